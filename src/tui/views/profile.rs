use crossterm::event::{KeyCode, KeyEvent};
use log::info;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::config::AppConfig;
use crate::models::ProgressStats;
use crate::tui::theme;
use crate::tui::widgets::popup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Notifications,
    SoundEffects,
    DarkMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Action,
    Premium,
    Toggle(Toggle),
    SignOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingItem {
    pub label: &'static str,
    pub kind: ItemKind,
}

const fn action(label: &'static str) -> SettingItem {
    SettingItem {
        label,
        kind: ItemKind::Action,
    }
}

pub static GROUPS: [(&str, &[SettingItem]); 4] = [
    (
        "Account",
        &[
            action("Edit Profile"),
            action("Change Avatar"),
            SettingItem {
                label: "Upgrade to Premium",
                kind: ItemKind::Premium,
            },
        ],
    ),
    (
        "Preferences",
        &[
            SettingItem {
                label: "Notifications",
                kind: ItemKind::Toggle(Toggle::Notifications),
            },
            SettingItem {
                label: "Sound Effects",
                kind: ItemKind::Toggle(Toggle::SoundEffects),
            },
            SettingItem {
                label: "Dark Mode",
                kind: ItemKind::Toggle(Toggle::DarkMode),
            },
        ],
    ),
    (
        "Family",
        &[
            action("Parent Dashboard"),
            action("Screen Time Controls"),
            action("Teacher Portal"),
        ],
    ),
    (
        "Support",
        &[
            action("Help Center"),
            action("App Settings"),
            SettingItem {
                label: "Sign Out",
                kind: ItemKind::SignOut,
            },
        ],
    ),
];

fn items() -> impl Iterator<Item = &'static SettingItem> {
    GROUPS.iter().flat_map(|(_, items)| items.iter())
}

/// Profile page state. Toggles live in memory only.
#[derive(Debug, Clone)]
pub struct ProfileScreen {
    selected: usize,
    notifications: bool,
    sound_effects: bool,
    dark_mode: bool,
    pub sign_out_prompt: bool,
    signed_out: bool,
}

impl ProfileScreen {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            selected: 0,
            notifications: config.preferences.notifications,
            sound_effects: config.preferences.sound_effects,
            dark_mode: config.preferences.dark_mode,
            sign_out_prompt: false,
            signed_out: false,
        }
    }

    pub fn selected_item(&self) -> Option<&'static SettingItem> {
        items().nth(self.selected)
    }

    pub fn is_on(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::Notifications => self.notifications,
            Toggle::SoundEffects => self.sound_effects,
            Toggle::DarkMode => self.dark_mode,
        }
    }

    pub fn sound_effects(&self) -> bool {
        self.sound_effects
    }

    pub fn is_signed_out(&self) -> bool {
        self.signed_out
    }

    fn flip(&mut self, toggle: Toggle) {
        let slot = match toggle {
            Toggle::Notifications => &mut self.notifications,
            Toggle::SoundEffects => &mut self.sound_effects,
            Toggle::DarkMode => &mut self.dark_mode,
        };
        *slot = !*slot;
        info!("{:?} set to {}", toggle, *slot);
    }

    pub fn activate(&mut self) {
        let Some(item) = self.selected_item() else {
            return;
        };
        match item.kind {
            ItemKind::Toggle(t) => self.flip(t),
            ItemKind::SignOut => self.sign_out_prompt = true,
            ItemKind::Action | ItemKind::Premium => info!("'{}' selected", item.label),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.sign_out_prompt {
            match key.code {
                KeyCode::Enter => {
                    self.sign_out_prompt = false;
                    self.signed_out = true;
                    info!("logged out");
                }
                KeyCode::Esc => self.sign_out_prompt = false,
                _ => {}
            }
            return;
        }
        match key.code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < items().count() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            _ => {}
        }
    }

    pub fn is_modal(&self) -> bool {
        self.sign_out_prompt
    }
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    screen: &ProfileScreen,
    config: &AppConfig,
    stats: &ProgressStats,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    let profile = &config.profile;
    let header = vec![
        Line::from(Span::styled(
            format!(" {} ", profile.avatar_initials),
            Style::default()
                .fg(theme::TEXT)
                .bg(theme::PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(profile.name.as_str(), theme::bold())),
        Line::from(Span::styled(profile.email.as_str(), theme::dim())),
        Line::from(Span::styled(
            format!("Level {} • {}", stats.level, stats.rank),
            theme::gold(),
        )),
        Line::from(vec![
            Span::styled(format!("{}", stats.problems_solved), theme::bold()),
            Span::styled(" Problems Solved   ", theme::dim()),
            Span::styled(format!("{}", stats.hours_learned), theme::bold()),
            Span::styled(" Hours Learned   ", theme::dim()),
            Span::styled(format!("{}", stats.day_streak), theme::bold()),
            Span::styled(" Day Streak", theme::dim()),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(header).alignment(Alignment::Center),
        chunks[0],
    );

    let mut lines = Vec::new();
    let mut index = 0;
    for (title, group) in GROUPS.iter() {
        lines.push(Line::from(Span::styled(format!(" {}", title), theme::primary())));
        for item in group.iter() {
            let focused = index == screen.selected;
            let marker = if focused { "▸ " } else { "  " };
            let mut style = match item.kind {
                ItemKind::Premium => theme::amber(),
                ItemKind::SignOut => theme::red(),
                _ => theme::base(),
            };
            if focused {
                style = style.add_modifier(Modifier::BOLD);
            }
            let mut spans = vec![
                Span::styled(format!("  {}", marker), theme::primary()),
                Span::styled(item.label, style),
            ];
            match item.kind {
                ItemKind::Toggle(t) => {
                    let (text, s) = if screen.is_on(t) {
                        ("  [on]", theme::green())
                    } else {
                        ("  [off]", theme::dim())
                    };
                    spans.push(Span::styled(text, s));
                }
                _ => spans.push(Span::styled("  ›", theme::dim())),
            }
            lines.push(Line::from(spans));
            index += 1;
        }
    }
    if screen.is_signed_out() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(" Signed out.", theme::dim())));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false));
    frame.render_widget(Paragraph::new(lines).block(block), chunks[1]);

    if screen.sign_out_prompt {
        popup::render(
            frame,
            area,
            "Sign Out",
            "Are you sure you want to sign out?",
            "[Enter] Sign Out  ·  [Esc] Cancel",
            theme::RED,
        );
    }
}

use std::io::{self, Write};

use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticKind {
    Selection,
    Impact,
}

/// Best-effort feedback. Implementations never fail; unsupported means no-op.
pub trait Haptics {
    fn vibrate(&self, kind: HapticKind);
}

/// Rings the terminal bell when sound effects are on.
#[derive(Debug, Clone, Copy)]
pub struct TerminalHaptics {
    enabled: bool,
}

impl TerminalHaptics {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

}

impl Haptics for TerminalHaptics {
    fn vibrate(&self, kind: HapticKind) {
        trace!("haptic {:?} (enabled: {})", kind, self.enabled);
        if !self.enabled {
            return;
        }
        let mut out = io::stdout();
        let _ = out.write_all(b"\x07").and_then(|_| out.flush());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut haptics = TerminalHaptics::new(false);
        haptics.vibrate(HapticKind::Impact);
        assert!(!haptics.enabled);
        haptics.set_enabled(true);
        assert!(haptics.enabled);
    }
}

use std::fmt;
use std::time::Duration;

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1500);

/// Despawn/respawn progression. Only `Active` runs the fixed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Active,
    Despawning,
    Despawned,
    Respawning,
}

impl Lifecycle {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn accepts_input(self) -> bool {
        self.is_active()
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Active => "active",
            Self::Despawning => "despawning",
            Self::Despawned => "despawned",
            Self::Respawning => "respawning",
        };
        f.write_str(name)
    }
}

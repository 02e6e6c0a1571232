pub struct Icons;

impl Icons {
    pub const QUESTION: &str = "❓";
    pub const TROPHY: &str = "🏆";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const PLAYER: &str = "👤";
    pub const FILE: &str = "📄";
}

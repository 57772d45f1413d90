use super::NodeKind;

/// Outline drawn for a node on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Pill,
    Rounded,
    Diamond,
    Parallelogram,
    Document,
}

/// How a node kind is drawn in the palette and on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub color: &'static str,
    pub icon: &'static str,
    pub shape: Shape,
}

pub fn presentation(kind: NodeKind) -> Presentation {
    let (color, icon, shape) = match kind {
        NodeKind::Start => ("#22c55e", "play-circle", Shape::Pill),
        NodeKind::End => ("#ef4444", "stop-circle", Shape::Pill),
        NodeKind::Process => ("#3b82f6", "cog", Shape::Rounded),
        NodeKind::Decision => ("#f59e0b", "git-branch", Shape::Diamond),
        NodeKind::Data => ("#06b6d4", "database", Shape::Parallelogram),
        NodeKind::Approval => ("#8b5cf6", "check-square", Shape::Rounded),
        NodeKind::Document => ("#64748b", "file-text", Shape::Document),
        NodeKind::Notification => ("#ec4899", "bell", Shape::Rounded),
        NodeKind::Report => ("#14b8a6", "bar-chart", Shape::Rounded),
        NodeKind::Assignment => ("#f97316", "user-check", Shape::Rounded),
    };
    Presentation { color, icon, shape }
}

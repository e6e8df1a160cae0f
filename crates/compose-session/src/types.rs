/// Whether a composition is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeState {
    Empty,
    Composing,
}

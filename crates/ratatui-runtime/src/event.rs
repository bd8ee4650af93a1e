use crossterm::event::Event as CrosstermEvent;

use crate::Tick;

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    Tick(Tick),
    Render,
    Crossterm(CrosstermEvent),
}

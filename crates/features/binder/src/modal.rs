/// Visibility of the waitlist modal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// Inputs that move the modal between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    /// Matched trigger click or host request.
    Trigger,
    CloseButton,
    Backdrop,
    Escape,
    AutoClose,
}

impl ModalState {
    #[must_use]
    pub const fn next(self, event: ModalEvent) -> Self {
        match event {
            ModalEvent::Trigger => Self::Open,
            ModalEvent::CloseButton
            | ModalEvent::Backdrop
            | ModalEvent::Escape
            | ModalEvent::AutoClose => Self::Closed,
        }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_close_event_closes() {
        for event in
            [ModalEvent::CloseButton, ModalEvent::Backdrop, ModalEvent::Escape, ModalEvent::AutoClose]
        {
            assert_eq!(ModalState::Open.next(event), ModalState::Closed);
            assert_eq!(ModalState::Closed.next(event), ModalState::Closed);
        }
    }

    #[test]
    fn trigger_opens_from_either_state() {
        assert_eq!(ModalState::default().next(ModalEvent::Trigger), ModalState::Open);
        assert!(ModalState::Open.next(ModalEvent::Trigger).is_open());
    }
}

use strum::Display;

use crate::contact::TouchContact;
use crate::error::OsError;

/// Visual feedback the OS draws for injected contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FeedbackMode {
    Default,
}

/// The two primitives an OS touch-injection facility exposes.
///
/// A failed call hands back the error code the OS reported for it.
pub trait TouchInjector {
    fn initialize(&mut self, max_contacts: u32, feedback: FeedbackMode) -> Result<(), OsError>;

    fn inject(&mut self, contacts: &[TouchContact]) -> Result<(), OsError>;
}

/// Accepts every call and prints what would have been injected.
#[derive(Debug, Default)]
pub struct DryRunInjector {
    injected: usize,
}

impl DryRunInjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn injected(&self) -> usize {
        self.injected
    }
}

pub fn describe(contact: &TouchContact) -> String {
    format!(
        "{:?} id={} at ({}, {}) flags={:?} touching={} area={:?} feedback={:?}",
        contact.kind,
        contact.id,
        contact.x,
        contact.y,
        contact.flags,
        contact.is_touching(),
        contact.area,
        contact.feedback
    )
}

impl TouchInjector for DryRunInjector {
    fn initialize(&mut self, max_contacts: u32, feedback: FeedbackMode) -> Result<(), OsError> {
        println!("[dry run] initialize: max_contacts={max_contacts} feedback={feedback}");
        Ok(())
    }

    fn inject(&mut self, contacts: &[TouchContact]) -> Result<(), OsError> {
        for contact in contacts {
            println!("[dry run] inject {}", describe(contact));
        }
        self.injected += contacts.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::PhaseFlags;

    #[test]
    fn dry_run_counts_contacts() {
        let mut injector = DryRunInjector::new();
        injector.initialize(10, FeedbackMode::Default).unwrap();
        let contact = TouchContact::new(PhaseFlags::DOWN, 1, 2, 0);
        injector.inject(&[contact]).unwrap();
        injector.inject(&[contact, contact]).unwrap();
        assert_eq!(injector.injected(), 3);
    }

    #[test]
    fn description_names_every_field() {
        let flags = PhaseFlags::DOWN | PhaseFlags::IN_RANGE | PhaseFlags::IN_CONTACT;
        let line = describe(&TouchContact::new(flags, 300, 300, 0));
        assert!(line.starts_with("Touch id=0 at (300, 300)"));
        assert!(line.contains("touching=true"));
        assert!(line.contains("feedback=None"));
        assert!(line.contains("left: 298"));
    }

    #[test]
    fn feedback_name() {
        assert_eq!(FeedbackMode::Default.to_string(), "default");
    }
}

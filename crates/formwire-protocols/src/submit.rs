//! Form submission protocol.

use crate::{NodeId, ParamMap};

/// Receives a form's encoded parameters when a button inside it is clicked.
///
/// Transport is out of scope: implementations may send a request, queue the
/// parameters, or just record them.
pub trait FormSubmitter {
    fn submit(&mut self, form: NodeId, params: &ParamMap);
}

/// One recorded submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub form: NodeId,
    pub params: ParamMap,
}

/// Submitter that keeps every submission in memory.
#[derive(Debug, Default)]
pub struct RecordingSubmitter {
    submissions: Vec<Submission>,
}

impl RecordingSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn last(&self) -> Option<&Submission> {
        self.submissions.last()
    }

    /// Drain the recorded submissions.
    pub fn take(&mut self) -> Vec<Submission> {
        std::mem::take(&mut self.submissions)
    }
}

impl FormSubmitter for RecordingSubmitter {
    fn submit(&mut self, form: NodeId, params: &ParamMap) {
        self.submissions.push(Submission {
            form,
            params: params.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParamValue;

    #[test]
    fn test_recording_submitter_keeps_order() {
        let mut submitter = RecordingSubmitter::new();
        let mut params = ParamMap::new();
        params.insert("q".to_string(), ParamValue::scalar("rust"));

        submitter.submit(NodeId(1), &params);
        submitter.submit(NodeId(2), &ParamMap::new());

        assert_eq!(submitter.submissions().len(), 2);
        assert_eq!(submitter.submissions()[0].form, NodeId(1));
        assert_eq!(submitter.last().map(|s| s.form), Some(NodeId(2)));
    }

    #[test]
    fn test_take_drains() {
        let mut submitter = RecordingSubmitter::new();
        submitter.submit(NodeId(1), &ParamMap::new());
        let taken = submitter.take();
        assert_eq!(taken.len(), 1);
        assert!(submitter.submissions().is_empty());
        assert!(submitter.last().is_none());
    }
}

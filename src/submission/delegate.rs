use crate::model::Site;
use crate::ui::Component;

/// How a submission attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// The server accepted the submission.
    Accepted,
    /// The submission failed. The form has already shown the reason.
    Failed(String),
}

/// A form that can be hosted inside [`FlavorSubmissionModal`].
///
/// The form owns its fields, validation and the submission call. The modal
/// only learns about results, either synchronously from `handle_key` or
/// later through `poll` for submissions that complete in the background.
/// Implementations must report `Accepted` exactly once per accepted
/// submission.
///
/// [`FlavorSubmissionModal`]: super::FlavorSubmissionModal
pub trait FormDelegate: Component<Output = FormOutcome> {
    /// The site this form submits for.
    fn site(&self) -> &Site;

    /// Return the outcome of a background submission, if one finished.
    fn poll(&mut self) -> Option<FormOutcome>;

    /// Called when the hosting modal is opened again after being hidden.
    fn reset(&mut self) {}
}

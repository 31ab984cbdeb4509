pub mod authority_synthesizer;
pub mod query_classifier;
pub mod reply;
pub mod response_reconciler;

pub use authority_synthesizer::AuthoritySynthesizer;
pub use query_classifier::{Classification, QueryClassifier, RewriteContext};
pub use reply::{adopt_request_header, reply_to};
pub use response_reconciler::ResponseReconciler;

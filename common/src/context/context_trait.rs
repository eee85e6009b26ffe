use super::{effectfull_context::EffectfullContext, test_context::TestContext};

/// Request context handed to services: either built from an HTTP request or
/// assembled directly by tests.
#[derive(Clone)]
pub enum GeneralContext {
    Test(TestContext),
    Effectfull(EffectfullContext),
}

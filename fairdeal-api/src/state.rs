use std::sync::Arc;

use fairdeal_offer::OfferEvaluator;

#[derive(Clone)]
pub struct AppState {
    pub evaluator: Arc<OfferEvaluator>,
}

impl AppState {
    pub fn new(evaluator: OfferEvaluator) -> Self {
        Self { evaluator: Arc::new(evaluator) }
    }
}

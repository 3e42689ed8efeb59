use std::sync::Arc;

use scout::EngineConnector;

#[must_use]
pub fn get_engine() -> Arc<dyn EngineConnector> {
    if let Ok(key) = std::env::var("EXA_API_KEY") {
        Arc::new(
            scout_exa::ExaConnector::builder()
                .api_key(key)
                .build()
                .expect("valid exa connector"),
        )
    } else {
        println!("--- (EXA_API_KEY not set, using mock engine) ---");
        Arc::new(scout_mock::MockEngine::new("mock"))
    }
}

#![allow(dead_code)]

pub mod test_runtime {
    use std::sync::Once;

    /// Ensures May coroutines are configured only once
    static MAY_INIT: Once = Once::new();

    pub fn setup_may_runtime() {
        MAY_INIT.call_once(|| {
            may::config().set_stack_size(0x8000);
        });
    }
}

pub mod requests {
    use serde_json::Value;
    use validize::RawRequest;

    /// Request with a single route parameter
    pub fn with_param(name: &str, value: &str) -> RawRequest {
        RawRequest::new().with_path_param(name, value)
    }

    /// Request with a JSON body and nothing else
    pub fn with_body(body: Value) -> RawRequest {
        RawRequest::new().with_body(body)
    }
}

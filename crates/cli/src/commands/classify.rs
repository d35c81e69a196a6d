use crate::commands::{async_runtime, load_config, question_runtime, CommandResult};

pub fn run(text: &str) -> CommandResult {
    let config = match load_config("classify") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let runtime = match async_runtime("classify") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    runtime.block_on(async {
        let agent = match question_runtime("classify", &config).await {
            Ok(agent) => agent,
            Err(failure) => return failure,
        };

        match agent.classify(text) {
            None => CommandResult::success("classify", "bot command; not classified"),
            Some(result) => match serde_json::to_value(&result) {
                Ok(data) => CommandResult::success_with_data(
                    "classify",
                    format!("classified as {}", result.category),
                    Some(data),
                ),
                Err(error) => {
                    CommandResult::failure("classify", "serialization", error.to_string(), 8)
                }
            },
        }
    })
}

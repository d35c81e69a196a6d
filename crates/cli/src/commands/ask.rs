use crate::commands::{async_runtime, load_config, question_runtime, CommandResult};

pub fn run(text: &str) -> CommandResult {
    let config = match load_config("ask") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let runtime = match async_runtime("ask") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    runtime.block_on(async {
        let agent = match question_runtime("ask", &config).await {
            Ok(agent) => agent,
            Err(failure) => return failure,
        };

        let Some(reply) = agent.handle_message(text).await else {
            return CommandResult::success("ask", "bot command; no reply");
        };

        let message = reply.chunks.join("\n");
        match serde_json::to_value(&reply) {
            Ok(data) => CommandResult::success_with_data("ask", message, Some(data)),
            Err(error) => CommandResult::failure("ask", "serialization", error.to_string(), 8),
        }
    })
}

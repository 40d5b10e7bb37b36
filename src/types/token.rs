pub type CommandCancellationToken = tokio_util::sync::CancellationToken;

pub fn create_command_cancellation_token() -> CommandCancellationToken {
    tokio_util::sync::CancellationToken::new()
}

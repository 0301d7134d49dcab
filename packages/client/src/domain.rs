//! Domain logic for client-side operations.
//!
//! Pure functions without side effects, so they are easy to test.

use crate::error::ClientError;

/// Check if the client should exit immediately based on the error type.
///
/// A rejected token will be rejected again on every reconnect.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::Unauthorized)
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_exit_immediately_with_unauthorized() {
        // テスト項目: Unauthorized エラーの場合、即座に終了すべきと判定される
        // given (前提条件):
        let error = ClientError::Unauthorized;

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_exit_immediately_with_connection_error() {
        // テスト項目: ConnectionError の場合、即座に終了すべきではないと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_with_unauthorized() {
        // テスト項目: Unauthorized エラーの場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = ClientError::Unauthorized;

        // when (操作):
        let result = should_attempt_reconnect(&error, 0, 5);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_within_and_at_limit() {
        // テスト項目: 再接続回数が上限未満なら再接続し、上限に達したら再接続しない
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作) / then (期待する結果):
        assert!(should_attempt_reconnect(&error, 0, 5));
        assert!(should_attempt_reconnect(&error, 4, 5));
        assert!(!should_attempt_reconnect(&error, 5, 5));
    }
}

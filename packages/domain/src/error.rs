//! # ドメイン層エラー定義
//!
//! Todo の入力ルール違反を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 発生箇所 |
//! |-----------|----------------|------|
//! | `MissingFields` | 404 Not Found | 全体更新（text なし + status あり） |
//! | `InvalidPatch` | 400 Bad Request | 部分更新の型・空文字チェック |
//! | `NoFieldsToUpdate` | 400 Bad Request | 部分更新で更新対象なし |
//! | `InvalidText` | 400 Bad Request | text が配列・オブジェクト |
//! | `InvalidStatus` | 400 Bad Request | 全体更新で status が真偽値でない |
//!
//! メッセージ文言（`Display`）はそのまま API レスポンスの `message` に使われる。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// 全体更新で text が偽値なのに status が真値
    #[error("Some fields are kissing")]
    MissingFields,

    /// 部分更新で text が空文字、または status が真偽値でない
    #[error("Invalid input: text cannot be empty and status must be a boolean")]
    InvalidPatch,

    /// 部分更新で text も status も指定されていない
    #[error("No valid fields to update")]
    NoFieldsToUpdate,

    /// text が配列・オブジェクト（文字列化できない）
    #[error("Invalid input: text must be a string, number or boolean")]
    InvalidText,

    /// status が真偽値でも null でもない
    #[error("Invalid input: status must be a boolean")]
    InvalidStatus,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_displayが既存クライアント向けの文言を出力する() {
        assert_eq!(
            DomainError::MissingFields.to_string(),
            "Some fields are kissing"
        );
        assert_eq!(
            DomainError::NoFieldsToUpdate.to_string(),
            "No valid fields to update"
        );
        assert_eq!(
            DomainError::InvalidPatch.to_string(),
            "Invalid input: text cannot be empty and status must be a boolean"
        );
    }
}

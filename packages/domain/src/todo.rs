//! # Todo エンティティと入力ルール
//!
//! `todos` テーブルの 1 行を表す [`Todo`] と、書き込み系リクエストの入力型を定義する。
//!
//! ## 入力値の表現
//!
//! リクエストボディの各フィールドは `Option<serde_json::Value>` で受け取る:
//!
//! - `None`: フィールド自体が存在しない
//! - `Some(Value::Null)`: 明示的に `null` が指定された
//! - `Some(その他)`: 値が指定された（型はまだ検証されていない）
//!
//! 全体更新のルールは JavaScript の truthy / falsy 判定で定義されているため、
//! 型を確定させる前の JSON 値のまま評価する必要がある。
//!
//! ## 入力型
//!
//! | 型 | 操作 | ルール |
//! |----|------|--------|
//! | [`NewTodo`] | 作成 | text の存在チェックなし（未指定は NULL、数値・真偽値は文字列化） |
//! | [`TodoReplacement`] | 全体更新 | text が偽値かつ status が真値なら拒否 |
//! | [`TodoPatch`] | 部分更新 | 空文字 text・非真偽値 status を拒否、`null` の text は NULL に更新、最低 1 フィールド必須 |

use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::DomainError;

/// Todo の識別子
///
/// DB が採番する整数の主キー。作成後に変更されることはない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct TodoId(i64);

impl TodoId {
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// Todo エンティティ
///
/// `text` と `status` はどちらも NULL を取り得る（作成時の text 未指定、
/// 全体更新での未指定フィールドは NULL として書き込まれる）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    id:     TodoId,
    text:   Option<String>,
    status: Option<bool>,
}

impl Todo {
    /// DB から取得した値で復元する
    pub fn from_db(id: TodoId, text: Option<String>, status: Option<bool>) -> Self {
        Self { id, text, status }
    }

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn status(&self) -> Option<bool> {
        self.status
    }

    /// 全体更新を適用した新しい Todo を返す
    ///
    /// text と status の両方を置き換える（未指定は NULL になる）。
    pub fn replaced(self, replacement: &TodoReplacement) -> Self {
        Self {
            id:     self.id,
            text:   replacement.text.clone(),
            status: replacement.status,
        }
    }

    /// 部分更新を適用した新しい Todo を返す
    ///
    /// 指定されたフィールドのみ置き換える（text の `null` 指定は NULL にする）。
    pub fn patched(self, patch: &TodoPatch) -> Self {
        let text = match &patch.text {
            Some(text) => text.clone(),
            None => self.text,
        };
        Self {
            id: self.id,
            text,
            status: patch.status.or(self.status),
        }
    }
}

/// 書き込み系操作の結果メタデータ
///
/// レスポンスの `data` にそのまま出力される。
/// 作成時のみ `insertId` を持つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoWriteResult {
    affected_rows: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    insert_id:     Option<TodoId>,
}

impl TodoWriteResult {
    /// 作成結果（1 行追加）
    pub fn inserted(id: TodoId) -> Self {
        Self {
            affected_rows: 1,
            insert_id:     Some(id),
        }
    }

    /// 更新・削除結果
    pub fn affected(rows: u64) -> Self {
        Self {
            affected_rows: rows,
            insert_id:     None,
        }
    }

    pub fn affected_rows(&self) -> u64 {
        self.affected_rows
    }

    pub fn insert_id(&self) -> Option<TodoId> {
        self.insert_id
    }
}

/// 作成リクエストの入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    text: Option<String>,
}

impl NewTodo {
    /// 作成入力を構築する
    ///
    /// text の存在チェックは行わない。未指定・`null` は NULL として挿入される。
    /// 空文字列もそのまま受け付け、数値・真偽値は文字列に変換する。
    pub fn new(text: Option<Value>) -> Result<Self, DomainError> {
        Ok(Self {
            text: text.map(text_column).transpose()?.flatten(),
        })
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// 全体更新リクエストの入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoReplacement {
    text:   Option<String>,
    status: Option<bool>,
}

impl TodoReplacement {
    /// 全体更新入力を構築する
    ///
    /// text が偽値（未指定・`null`・空文字など）かつ status が真値の場合は
    /// [`DomainError::MissingFields`] を返す。両方未指定の場合は拒否せず、
    /// 両カラムに NULL を書き込む入力になる。
    pub fn new(text: Option<Value>, status: Option<Value>) -> Result<Self, DomainError> {
        if !is_truthy(text.as_ref()) && is_truthy(status.as_ref()) {
            return Err(DomainError::MissingFields);
        }

        let status = match status {
            None | Some(Value::Null) => None,
            Some(Value::Bool(b)) => Some(b),
            Some(_) => return Err(DomainError::InvalidStatus),
        };

        Ok(Self {
            text: text.map(text_column).transpose()?.flatten(),
            status,
        })
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn status(&self) -> Option<bool> {
        self.status
    }
}

/// 部分更新リクエストの入力
///
/// 少なくとも 1 つのフィールドを持つことが構築時に保証される。
/// `text` の `Some(None)` は「NULL に更新する」を表す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoPatch {
    text:   Option<Option<String>>,
    status: Option<bool>,
}

impl TodoPatch {
    /// 部分更新入力を構築する
    ///
    /// 1. text が空文字、または status が真偽値以外 → [`DomainError::InvalidPatch`]
    /// 2. text が配列・オブジェクト → [`DomainError::InvalidText`]
    /// 3. どちらも未指定 → [`DomainError::NoFieldsToUpdate`]
    ///
    /// text の `null` は NULL への更新として受け付ける。
    pub fn new(text: Option<Value>, status: Option<Value>) -> Result<Self, DomainError> {
        let text = match text {
            None => None,
            Some(Value::String(s)) if s.is_empty() => return Err(DomainError::InvalidPatch),
            Some(value) => Some(text_column(value)?),
        };

        let status = match status {
            None => None,
            Some(Value::Bool(b)) => Some(b),
            Some(_) => return Err(DomainError::InvalidPatch),
        };

        if text.is_none() && status.is_none() {
            return Err(DomainError::NoFieldsToUpdate);
        }

        Ok(Self { text, status })
    }

    /// 更新対象なら `Some`。中身の `None` は NULL への更新
    pub fn text(&self) -> Option<Option<&str>> {
        self.text.as_ref().map(Option::as_deref)
    }

    pub fn status(&self) -> Option<bool> {
        self.status
    }
}

/// JSON 値を `text` カラムに書き込む値へ変換する
///
/// `null` は NULL、文字列はそのまま。数値は文字列表現、真偽値は `1` / `0`
/// （TEXT カラムに真偽値を書いたときの格納値）になる。配列・オブジェクトは拒否する。
fn text_column(value: Value) -> Result<Option<String>, DomainError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(if b { "1" } else { "0" }.to_string())),
        Value::Array(_) | Value::Object(_) => Err(DomainError::InvalidText),
    }
}

/// JavaScript の truthy 判定
///
/// 未指定・`null`・`false`・`0`・空文字は偽、それ以外（空配列・空オブジェクトを含む）は真。
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

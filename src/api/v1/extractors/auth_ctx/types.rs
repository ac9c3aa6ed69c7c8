/*
 * Responsibility
 * - リクエスト単位の実行コンテキスト (AuthCtx) の型
 * - middleware (access) が 1 回だけ組み立てて request extensions に格納し、以降は読み取り専用
 *
 * Notes
 * - credential の検証やユーザー lookup は middleware/services 側の責務
 * - identity が無いことはエラーではなく「匿名リクエスト」という事実
 */
use crate::services::auth::Identity;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthCtx {
    identity: Option<Identity>,
}

impl AuthCtx {
    pub fn new(identity: Option<Identity>) -> Self {
        Self { identity }
    }

    #[cfg(test)]
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[cfg(test)]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// The caller's identity.
    ///
    /// # Panics
    /// When no identity was resolved. Only guarded operations may call this, and the
    /// guard has already refused anonymous callers, so reaching the panic means the
    /// operation's policy or route wiring is wrong.
    pub fn current(&self) -> &Identity {
        match &self.identity {
            Some(identity) => identity,
            None => panic!(
                "identity accessed on an anonymous request: operation is missing an access policy"
            ),
        }
    }
}

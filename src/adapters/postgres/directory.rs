use crate::domain::value_objects::{BookId, MemberId};
use crate::ports::{book_service, member_service};
use async_trait::async_trait;
use sqlx::PgPool;

/// 会員・書籍の存在確認のPostgreSQL実装
pub struct Directory {
    pool: PgPool,
}

impl Directory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl member_service::MemberService for Directory {
    async fn exists(&self, member_id: MemberId) -> member_service::Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM members WHERE member_id = $1)")
                .bind(member_id.value())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

#[async_trait]
impl book_service::BookService for Directory {
    async fn exists(&self, book_id: BookId) -> book_service::Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM books WHERE book_id = $1)")
                .bind(book_id.value())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

use crate::domain::{
    Book, Loan, Member,
    value_objects::{BookId, LoanId, MemberId},
};
use crate::ports::loan_repository::{
    LoanDetails, LoanRepository as LoanRepositoryTrait, Result,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row, postgres::PgRow};

/// PostgreSQLの行データをLoanに変換する
fn map_row_to_loan(row: &PgRow) -> Loan {
    Loan {
        loan_id: LoanId::from_uuid(row.get("loan_id")),
        book_id: BookId::from_uuid(row.get("book_id")),
        member_id: MemberId::from_uuid(row.get("member_id")),
        due_date: row.get("due_date"),
        is_returned: row.get("is_returned"),
        created_at: row.get("created_at"),
    }
}

/// 会員・書籍を結合した行データをLoanDetailsに変換する
fn map_row_to_loan_details(row: &PgRow) -> LoanDetails {
    let loan = map_row_to_loan(row);

    LoanDetails {
        member: Member {
            member_id: loan.member_id,
            email: row.get("email"),
            display_name: row.get("display_name"),
        },
        book: Book {
            book_id: loan.book_id,
            title: row.get("title"),
        },
        loan,
    }
}

/// LoanRepositoryのPostgreSQL実装
pub struct LoanRepository {
    pool: PgPool,
}

impl LoanRepository {
    /// PostgreSQLコネクションプールから新しいLoanRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanRepositoryTrait for LoanRepository {
    /// 貸出を保存
    ///
    /// 会員・書籍の存在は外部キー制約で保証される。
    async fn insert(&self, loan: Loan) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO loans (
                loan_id,
                book_id,
                member_id,
                due_date,
                is_returned,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(loan.loan_id.value())
        .bind(loan.book_id.value())
        .bind(loan.member_id.value())
        .bind(loan.due_date)
        .bind(loan.is_returned)
        .bind(loan.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_by_id(&self, loan_id: LoanId) -> Result<Option<Loan>> {
        let row = sqlx::query(
            r#"
            SELECT
                loan_id,
                book_id,
                member_id,
                due_date,
                is_returned,
                created_at
            FROM loans
            WHERE loan_id = $1
            "#,
        )
        .bind(loan_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_row_to_loan))
    }

    async fn get_details(&self, loan_id: LoanId) -> Result<Option<LoanDetails>> {
        let row = sqlx::query(
            r#"
            SELECT
                l.loan_id,
                l.book_id,
                l.member_id,
                l.due_date,
                l.is_returned,
                l.created_at,
                m.email,
                m.display_name,
                b.title
            FROM loans l
            JOIN members m ON m.member_id = l.member_id
            JOIN books b ON b.book_id = l.book_id
            WHERE l.loan_id = $1
            "#,
        )
        .bind(loan_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_row_to_loan_details))
    }

    /// 督促候補を検索（バッチ用）
    ///
    /// (due_date) WHERE NOT is_returned の部分インデックスを使用する。
    async fn find_unreturned_due_before(&self, cutoff: NaiveDate) -> Result<Vec<LoanDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT
                l.loan_id,
                l.book_id,
                l.member_id,
                l.due_date,
                l.is_returned,
                l.created_at,
                m.email,
                m.display_name,
                b.title
            FROM loans l
            JOIN members m ON m.member_id = l.member_id
            JOIN books b ON b.book_id = l.book_id
            WHERE l.is_returned = FALSE AND l.due_date < $1
            ORDER BY l.due_date ASC
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_row_to_loan_details).collect())
    }

    /// 返却期限を条件付きで更新
    ///
    /// 1文のUPDATEで比較と書き込みを行うため、同じ行への並行した延長・返却と競合しない。
    async fn update_due_date(
        &self,
        loan_id: LoanId,
        expected: NaiveDate,
        new_due_date: NaiveDate,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE loans
            SET due_date = $3
            WHERE loan_id = $1 AND due_date = $2 AND is_returned = FALSE
            "#,
        )
        .bind(loan_id.value())
        .bind(expected)
        .bind(new_due_date)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

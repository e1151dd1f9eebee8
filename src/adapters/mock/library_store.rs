use crate::domain::{
    Book, Loan, Member,
    value_objects::{BookId, LoanId, MemberId},
};
use crate::ports::{
    book_service::BookService, loan_repository::LoanDetails, loan_repository::LoanRepository,
    member_service::MemberService,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Default)]
struct State {
    members: HashMap<MemberId, Member>,
    books: HashMap<BookId, Book>,
    loans: HashMap<LoanId, Loan>,
}

/// インメモリのストア実装
///
/// 貸出・会員・書籍を1つのロックで保持し、
/// LoanRepository / MemberService / BookService をまとめて提供する。
/// 参照整合性（会員・書籍の存在）は insert 時に検査する。
pub struct LibraryStore {
    state: Mutex<State>,
}

impl LibraryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    /// テスト用に会員を登録
    pub fn add_member(&self, member: Member) {
        self.state
            .lock()
            .unwrap()
            .members
            .insert(member.member_id, member);
    }

    /// テスト用に書籍を登録
    pub fn add_book(&self, book: Book) {
        self.state.lock().unwrap().books.insert(book.book_id, book);
    }

    /// テスト用に貸出を直接登録（参照整合性は検査しない）
    pub fn put_loan(&self, loan: Loan) {
        self.state.lock().unwrap().loans.insert(loan.loan_id, loan);
    }

    /// テスト用に貸出を削除
    pub fn remove_loan(&self, loan_id: LoanId) {
        self.state.lock().unwrap().loans.remove(&loan_id);
    }

    /// テスト用に会員のメールアドレスを変更
    pub fn update_member_email(&self, member_id: MemberId, email: &str) {
        if let Some(member) = self.state.lock().unwrap().members.get_mut(&member_id) {
            member.email = email.to_string();
        }
    }

    /// テスト用に貸出を返却済みにする
    pub fn mark_returned(&self, loan_id: LoanId) {
        if let Some(loan) = self.state.lock().unwrap().loans.get_mut(&loan_id) {
            loan.is_returned = true;
        }
    }

    /// 現在の貸出を取得（テストでの検証用）
    pub fn loan(&self, loan_id: LoanId) -> Option<Loan> {
        self.state.lock().unwrap().loans.get(&loan_id).cloned()
    }

    fn details(state: &State, loan: &Loan) -> Option<LoanDetails> {
        let member = state.members.get(&loan.member_id)?;
        let book = state.books.get(&loan.book_id)?;
        Some(LoanDetails {
            loan: loan.clone(),
            member: member.clone(),
            book: book.clone(),
        })
    }
}

impl Default for LibraryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoanRepository for LibraryStore {
    async fn insert(&self, loan: Loan) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.members.contains_key(&loan.member_id) {
            return Err(format!("member {} does not exist", loan.member_id.value()).into());
        }
        if !state.books.contains_key(&loan.book_id) {
            return Err(format!("book {} does not exist", loan.book_id.value()).into());
        }
        if state.loans.contains_key(&loan.loan_id) {
            return Err(format!("loan {} already exists", loan.loan_id.value()).into());
        }
        state.loans.insert(loan.loan_id, loan);
        Ok(())
    }

    async fn get_by_id(&self, loan_id: LoanId) -> Result<Option<Loan>> {
        Ok(self.state.lock().unwrap().loans.get(&loan_id).cloned())
    }

    async fn get_details(&self, loan_id: LoanId) -> Result<Option<LoanDetails>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .loans
            .get(&loan_id)
            .and_then(|loan| Self::details(&state, loan)))
    }

    async fn find_unreturned_due_before(&self, cutoff: NaiveDate) -> Result<Vec<LoanDetails>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .loans
            .values()
            .filter(|loan| !loan.is_returned && loan.due_date < cutoff)
            .filter_map(|loan| Self::details(&state, loan))
            .collect())
    }

    async fn update_due_date(
        &self,
        loan_id: LoanId,
        expected: NaiveDate,
        new_due_date: NaiveDate,
    ) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        match state.loans.get_mut(&loan_id) {
            Some(loan) if !loan.is_returned && loan.due_date == expected => {
                loan.due_date = new_due_date;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl MemberService for LibraryStore {
    async fn exists(&self, member_id: MemberId) -> Result<bool> {
        Ok(self.state.lock().unwrap().members.contains_key(&member_id))
    }
}

#[async_trait]
impl BookService for LibraryStore {
    async fn exists(&self, book_id: BookId) -> Result<bool> {
        Ok(self.state.lock().unwrap().books.contains_key(&book_id))
    }
}

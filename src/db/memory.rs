//! In-memory store
//!
//! All collections sit behind one `RwLock`. A membership toggle reads and
//! writes both the user and the problem under a single write guard.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{order_by_ids, PasswordReset, Store};
use crate::{
    error::{AppError, AppResult},
    models::{CreatedBy, ListField, Membership, NewProblem, NewUser, Problem, ProblemPatch, User},
};

#[derive(Debug, Default)]
struct Collections {
    users: HashMap<Uuid, User>,
    /// Insertion order
    problems: Vec<Problem>,
    resets: HashMap<String, PasswordReset>,
}

impl Collections {
    fn problem_mut(&mut self, id: &Uuid) -> Option<&mut Problem> {
        self.problems.iter_mut().find(|p| p.id == *id)
    }
}

/// [`Store`] keeping everything in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Remove `id` from `list` if present, append it otherwise. Returns whether
/// `id` is in the list afterwards.
fn flip(list: &mut Vec<Uuid>, id: Uuid) -> bool {
    match list.iter().position(|x| *x == id) {
        Some(pos) => {
            list.remove(pos);
            false
        }
        None => {
            list.push(id);
            true
        }
    }
}

fn list_mut<'a>(lists: (&'a mut Vec<Uuid>, &'a mut Vec<Uuid>), field: ListField) -> &'a mut Vec<Uuid> {
    match field {
        ListField::Bookmarks => lists.0,
        ListField::Interested => lists.1,
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, input: NewUser) -> AppResult<User> {
        let mut inner = self.inner.write().await;

        if inner.users.values().any(|u| u.email == input.email) {
            return Err(AppError::AlreadyExists("Email already registered".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: input.email,
            role: input.role,
            password_hash: input.password_hash,
            bookmarks: Vec::new(),
            interested: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_user_by_id(&self, id: &Uuid) -> AppResult<Option<User>> {
        Ok(self.inner.read().await.users.get(id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_password(&self, id: &Uuid, password_hash: &str) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn create_problem(&self, input: NewProblem, created_by: CreatedBy) -> AppResult<Problem> {
        let now = Utc::now();
        let problem = Problem {
            id: Uuid::new_v4(),
            title: input.title,
            domain: input.domain,
            statement: input.statement,
            departments: input.departments,
            keywords: input.keywords,
            source: input.source,
            source_link: input.source_link,
            organisation: input.organisation,
            notes: input.notes,
            created_by,
            bookmarks: Vec::new(),
            interested: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.inner.write().await.problems.push(problem.clone());
        Ok(problem)
    }

    async fn find_problem(&self, id: &Uuid) -> AppResult<Option<Problem>> {
        let inner = self.inner.read().await;
        Ok(inner.problems.iter().find(|p| p.id == *id).cloned())
    }

    async fn list_problems(&self) -> AppResult<Vec<Problem>> {
        let inner = self.inner.read().await;
        Ok(inner.problems.iter().rev().cloned().collect())
    }

    async fn list_problems_by_creator(&self, uid: &Uuid) -> AppResult<Vec<Problem>> {
        let inner = self.inner.read().await;
        Ok(inner
            .problems
            .iter()
            .rev()
            .filter(|p| p.is_owned_by(uid))
            .cloned()
            .collect())
    }

    async fn list_problems_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Problem>> {
        let inner = self.inner.read().await;
        let found = inner
            .problems
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect();
        Ok(order_by_ids(ids, found))
    }

    async fn update_problem(&self, id: &Uuid, patch: ProblemPatch) -> AppResult<Problem> {
        let mut inner = self.inner.write().await;
        let problem = inner
            .problem_mut(id)
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;
        patch.apply(problem);
        problem.updated_at = Utc::now();
        Ok(problem.clone())
    }

    async fn delete_problem(&self, id: &Uuid) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        let before = inner.problems.len();
        inner.problems.retain(|p| p.id != *id);
        if inner.problems.len() == before {
            return Err(AppError::NotFound("Problem not found".to_string()));
        }
        for user in inner.users.values_mut() {
            user.bookmarks.retain(|p| p != id);
            user.interested.retain(|p| p != id);
        }
        Ok(())
    }

    async fn toggle_membership(
        &self,
        user_id: &Uuid,
        problem_id: &Uuid,
        list: ListField,
    ) -> AppResult<Membership> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;

        let problem = inner
            .problems
            .iter_mut()
            .find(|p| p.id == *problem_id)
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;
        let user = inner
            .users
            .get_mut(user_id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let member = flip(list_mut((&mut user.bookmarks, &mut user.interested), list), *problem_id);
        user.updated_at = Utc::now();

        let uids = list_mut((&mut problem.bookmarks, &mut problem.interested), list);
        let present = uids.contains(user_id);
        if member != present {
            flip(uids, *user_id);
        }

        Ok(Membership {
            problem_id: *problem_id,
            list,
            member,
        })
    }

    async fn save_password_reset(&self, reset: PasswordReset) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner.resets.retain(|_, r| r.user_id != reset.user_id);
        inner.resets.insert(reset.token_hash.clone(), reset);
        Ok(())
    }

    async fn take_password_reset(&self, token_hash: &str) -> AppResult<Option<PasswordReset>> {
        Ok(self.inner.write().await.resets.remove(token_hash))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio_test::assert_ok;

    use super::*;
    use crate::models::Role;

    async fn seed(store: &MemoryStore) -> (User, Problem) {
        let admin = store
            .create_user(NewUser {
                email: "admin@example.com".into(),
                role: Role::Admin,
                password_hash: "hash".into(),
            })
            .await
            .unwrap();
        let student = store
            .create_user(NewUser {
                email: "student@example.com".into(),
                role: Role::Student,
                password_hash: "hash".into(),
            })
            .await
            .unwrap();
        let problem = store
            .create_problem(
                NewProblem {
                    title: "Flood early warning".into(),
                    statement: "Predict river floods".into(),
                    ..Default::default()
                },
                CreatedBy {
                    uid: admin.id,
                    email: admin.email.clone(),
                },
            )
            .await
            .unwrap();
        (student, problem)
    }

    #[tokio::test]
    async fn test_ping_and_empty_listings() {
        let store = MemoryStore::new();
        assert_ok!(store.ping().await);
        assert!(assert_ok!(store.list_problems().await).is_empty());
        assert!(assert_ok!(store.list_problems_by_ids(&[Uuid::new_v4()]).await).is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        seed(&store).await;
        let err = store
            .create_user(NewUser {
                email: "student@example.com".into(),
                role: Role::Student,
                password_hash: "x".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_toggle_flips_both_sides() {
        let store = MemoryStore::new();
        let (student, problem) = seed(&store).await;

        let m = store
            .toggle_membership(&student.id, &problem.id, ListField::Bookmarks)
            .await
            .unwrap();
        assert!(m.member);

        let user = store.find_user_by_id(&student.id).await.unwrap().unwrap();
        let p = store.find_problem(&problem.id).await.unwrap().unwrap();
        assert_eq!(user.bookmarks, vec![problem.id]);
        assert_eq!(p.bookmarks, vec![student.id]);
        assert!(user.interested.is_empty());

        let m = store
            .toggle_membership(&student.id, &problem.id, ListField::Bookmarks)
            .await
            .unwrap();
        assert!(!m.member);

        let user = store.find_user_by_id(&student.id).await.unwrap().unwrap();
        let p = store.find_problem(&problem.id).await.unwrap().unwrap();
        assert!(user.bookmarks.is_empty());
        assert!(p.bookmarks.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_unknown_problem() {
        let store = MemoryStore::new();
        let (student, _) = seed(&store).await;
        let err = store
            .toggle_membership(&student.id, &Uuid::new_v4(), ListField::Interested)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_concurrent_toggles_are_not_lost() {
        let store = Arc::new(MemoryStore::new());
        let (_, problem) = seed(&store).await;

        let mut students = Vec::new();
        for i in 0..16 {
            let user = store
                .create_user(NewUser {
                    email: format!("s{i}@example.com"),
                    role: Role::Student,
                    password_hash: "hash".into(),
                })
                .await
                .unwrap();
            students.push(user.id);
        }

        let handles: Vec<_> = students
            .iter()
            .map(|uid| {
                let store = Arc::clone(&store);
                let uid = *uid;
                let pid = problem.id;
                tokio::spawn(async move {
                    store
                        .toggle_membership(&uid, &pid, ListField::Interested)
                        .await
                })
            })
            .collect();
        for h in handles {
            assert!(h.await.unwrap().unwrap().member);
        }

        let p = store.find_problem(&problem.id).await.unwrap().unwrap();
        assert_eq!(p.interested.len(), students.len());
        for uid in &students {
            assert!(p.interested.contains(uid));
        }
    }

    #[tokio::test]
    async fn test_concurrent_toggles_by_one_user() {
        const N: usize = 9;
        let store = Arc::new(MemoryStore::new());
        let (student, problem) = seed(&store).await;

        let handles: Vec<_> = (0..N)
            .map(|_| {
                let store = Arc::clone(&store);
                let (uid, pid) = (student.id, problem.id);
                tokio::spawn(async move {
                    store.toggle_membership(&uid, &pid, ListField::Bookmarks).await
                })
            })
            .collect();
        for h in handles {
            assert_ok!(h.await.unwrap());
        }

        let user = store.find_user_by_id(&student.id).await.unwrap().unwrap();
        let p = store.find_problem(&problem.id).await.unwrap().unwrap();
        let member = N % 2 == 1;
        assert_eq!(user.bookmarks.contains(&problem.id), member);
        assert_eq!(p.bookmarks.contains(&student.id), member);
        assert!(user.bookmarks.len() <= 1);
        assert!(p.bookmarks.len() <= 1);
    }

    #[tokio::test]
    async fn test_delete_scrubs_user_lists() {
        let store = MemoryStore::new();
        let (student, problem) = seed(&store).await;
        store
            .toggle_membership(&student.id, &problem.id, ListField::Bookmarks)
            .await
            .unwrap();

        store.delete_problem(&problem.id).await.unwrap();

        let user = store.find_user_by_id(&student.id).await.unwrap().unwrap();
        assert!(user.bookmarks.is_empty());
        assert!(store.find_problem(&problem.id).await.unwrap().is_none());
        assert!(matches!(
            store.delete_problem(&problem.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_by_ids_follows_id_order() {
        let store = MemoryStore::new();
        let (_, first) = seed(&store).await;
        let second = store
            .create_problem(
                NewProblem {
                    title: "Second".into(),
                    statement: "s".into(),
                    ..Default::default()
                },
                first.created_by.clone(),
            )
            .await
            .unwrap();

        let listed = store
            .list_problems_by_ids(&[second.id, Uuid::new_v4(), first.id])
            .await
            .unwrap();
        let ids: Vec<_> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        let all = store.list_problems().await.unwrap();
        assert_eq!(all[0].id, second.id);
    }

    #[tokio::test]
    async fn test_reset_tokens_are_single_use() {
        let store = MemoryStore::new();
        let (student, _) = seed(&store).await;
        let reset = PasswordReset {
            token_hash: "abc".into(),
            user_id: student.id,
            expires_at: Utc::now(),
        };
        store.save_password_reset(reset.clone()).await.unwrap();
        assert_eq!(store.take_password_reset("abc").await.unwrap(), Some(reset));
        assert_eq!(store.take_password_reset("abc").await.unwrap(), None);
    }
}

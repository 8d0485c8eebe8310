//! Bookmark and interest lists

use tracing::debug;
use uuid::Uuid;

use crate::{
    db::Store,
    error::{AppError, AppResult},
    models::{ListField, Membership, Problem, User},
};

use super::ProblemFilter;

/// A problem as seen by one student
#[derive(Debug, Clone)]
pub struct FlaggedProblem {
    pub problem: Problem,
    pub bookmarked: bool,
    pub interested: bool,
}

/// Membership service for business logic
pub struct MembershipService;

impl MembershipService {
    /// Flip `problem_id` in the student's `list`
    pub async fn toggle(
        store: &dyn Store,
        user_id: &Uuid,
        problem_id: &Uuid,
        list: ListField,
    ) -> AppResult<Membership> {
        let membership = store.toggle_membership(user_id, problem_id, list).await?;
        debug!(%user_id, %problem_id, %list, member = membership.member, "Toggled list membership");
        Ok(membership)
    }

    /// The problems in the student's `list`, in the order they were added
    pub async fn list(store: &dyn Store, user_id: &Uuid, list: ListField) -> AppResult<Vec<Problem>> {
        let user = Self::user(store, user_id).await?;
        store.list_problems_by_ids(user.list(list)).await
    }

    /// All problems matching `filter`, flagged with the student's memberships
    pub async fn browse(
        store: &dyn Store,
        user_id: &Uuid,
        filter: &ProblemFilter,
    ) -> AppResult<Vec<FlaggedProblem>> {
        let user = Self::user(store, user_id).await?;
        let problems = filter.apply(store.list_problems().await?);

        Ok(problems
            .into_iter()
            .map(|problem| FlaggedProblem {
                bookmarked: user.bookmarks.contains(&problem.id),
                interested: user.interested.contains(&problem.id),
                problem,
            })
            .collect())
    }

    async fn user(store: &dyn Store, user_id: &Uuid) -> AppResult<User> {
        store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::MemoryStore,
        models::{CreatedBy, NewProblem, NewUser, Role},
    };

    async fn setup() -> (MemoryStore, Uuid, Vec<Uuid>) {
        let store = MemoryStore::new();
        let student = store
            .create_user(NewUser {
                email: "s@example.com".into(),
                role: Role::Student,
                password_hash: "h".into(),
            })
            .await
            .unwrap();

        let mut ids = Vec::new();
        for (title, dept) in [("one", "Design"), ("two", "Management"), ("three", "Design")] {
            let p = store
                .create_problem(
                    NewProblem {
                        title: title.into(),
                        statement: "s".into(),
                        departments: vec![dept.into()],
                        ..Default::default()
                    },
                    CreatedBy {
                        uid: Uuid::nil(),
                        email: "admin@example.com".into(),
                    },
                )
                .await
                .unwrap();
            ids.push(p.id);
        }
        (store, student.id, ids)
    }

    #[tokio::test]
    async fn test_list_follows_toggle_order() {
        let (store, uid, ids) = setup().await;
        MembershipService::toggle(&store, &uid, &ids[2], ListField::Bookmarks).await.unwrap();
        MembershipService::toggle(&store, &uid, &ids[0], ListField::Bookmarks).await.unwrap();

        let listed = MembershipService::list(&store, &uid, ListField::Bookmarks).await.unwrap();
        let titles: Vec<_> = listed.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["three", "one"]);
        assert!(MembershipService::list(&store, &uid, ListField::Interested)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_browse_flags_and_filters() {
        let (store, uid, ids) = setup().await;
        MembershipService::toggle(&store, &uid, &ids[0], ListField::Interested).await.unwrap();

        let view = MembershipService::browse(&store, &uid, &ProblemFilter::by_department(Some("Design".into())))
            .await
            .unwrap();
        assert_eq!(view.len(), 2);
        let one = view.iter().find(|f| f.problem.id == ids[0]).unwrap();
        assert!(one.interested && !one.bookmarked);
        let three = view.iter().find(|f| f.problem.id == ids[2]).unwrap();
        assert!(!three.interested && !three.bookmarked);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let (store, _, _) = setup().await;
        let err = MembershipService::list(&store, &Uuid::new_v4(), ListField::Bookmarks)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

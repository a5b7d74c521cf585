use innkeep_core::StoreError;
use innkeep_sql::Value;
use innkeep_store::DelState;

use super::UsercenterService;
use crate::model::{User, UserAuth, auth_type};

pub struct RegisterInput {
    pub mobile: String,
    pub password: String,
    pub nickname: String,
}

impl UsercenterService {
    /// Create an account: the user row and its system auth binding are
    /// written in one transaction. A mobile number that is already registered
    /// is rejected up front.
    pub fn register(&self, input: RegisterInput) -> Result<User, StoreError> {
        if self.find_by_mobile(&input.mobile)?.is_some() {
            return Err(StoreError::AlreadyExists(format!(
                "mobile {} already registered",
                input.mobile
            )));
        }

        let mut user = User {
            id: 0,
            delete_time: None,
            del_state: DelState::NotDeleted,
            version: 0,
            mobile: input.mobile,
            password: input.password,
            nickname: input.nickname,
            sex: 0,
            avatar: String::new(),
            info: String::new(),
        };

        self.user.trans(|session| {
            let user_id = self.user.insert(Some(session), &mut user)?;
            let mut auth = UserAuth {
                id: 0,
                delete_time: None,
                del_state: DelState::NotDeleted,
                version: 0,
                user_id,
                auth_key: user.mobile.clone(),
                auth_type: auth_type::SYSTEM.to_string(),
            };
            self.user_auth.insert(Some(session), &mut auth)?;
            Ok(())
        })?;

        Ok(user)
    }

    /// Look up a live account by mobile number.
    pub fn find_by_mobile(&self, mobile: &str) -> Result<Option<User>, StoreError> {
        let builder = self
            .user
            .select_builder()
            .and_where_eq("mobile", Value::Text(mobile.to_string()));
        let users = self.user.find_all(builder, "")?;
        Ok(users.into_iter().next())
    }

    /// Account detail by id.
    pub fn user_info(&self, user_id: i64) -> Result<User, StoreError> {
        self.user.find_one(user_id)
    }
}

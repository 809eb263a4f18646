use crate::domain::model::{AuthenticatedUser, Role};

struct DemoUser {
    id: &'static str,
    email: &'static str,
    password: &'static str,
    name: &'static str,
    role: Role,
}

const DEMO_USERS: [DemoUser; 2] = [
    DemoUser {
        id: "1",
        email: "user@example.com",
        password: "password123",
        name: "John Doe",
        role: Role::Guest,
    },
    DemoUser {
        id: "2",
        email: "host@example.com",
        password: "password123",
        name: "Jane Smith",
        role: Role::Host,
    },
];

/// 比對寫死的示範帳號；任一欄位為空直接回傳 `None`
pub fn authenticate(email: &str, password: &str) -> Option<AuthenticatedUser> {
    if email.is_empty() || password.is_empty() {
        return None;
    }

    let user = DEMO_USERS
        .iter()
        .find(|user| user.email == email && user.password == password);

    match user {
        Some(user) => {
            tracing::debug!("Authenticated {} as {}", user.email, user.role);
            Some(AuthenticatedUser {
                id: user.id.to_string(),
                email: user.email.to_string(),
                name: user.name.to_string(),
                role: user.role,
            })
        }
        None => {
            tracing::debug!("Rejected credentials for {}", email);
            None
        }
    }
}

/// 依 id 查詢示範帳號（不含密碼）
pub fn user_by_id(id: &str) -> Option<AuthenticatedUser> {
    DEMO_USERS
        .iter()
        .find(|user| user.id == id)
        .map(|user| AuthenticatedUser {
            id: user.id.to_string(),
            email: user.email.to_string(),
            name: user.name.to_string(),
            role: user.role,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_and_host_login() {
        let guest = authenticate("user@example.com", "password123").unwrap();
        assert_eq!(guest.id, "1");
        assert_eq!(guest.name, "John Doe");
        assert_eq!(guest.role, Role::Guest);

        let host = authenticate("host@example.com", "password123").unwrap();
        assert_eq!(host.id, "2");
        assert_eq!(host.role, Role::Host);
    }

    #[test]
    fn test_rejects_wrong_or_missing_credentials() {
        assert!(authenticate("user@example.com", "wrong").is_none());
        assert!(authenticate("USER@example.com", "password123").is_none());
        assert!(authenticate("", "password123").is_none());
        assert!(authenticate("user@example.com", "").is_none());
    }

    #[test]
    fn test_user_by_id() {
        assert_eq!(user_by_id("2").unwrap().name, "Jane Smith");
        assert!(user_by_id("3").is_none());
    }
}

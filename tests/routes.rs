use claimdesk::auth::TokenStore;
use claimdesk::routes::Route;

#[test]
fn test_parse_known_paths() {
    assert_eq!(Route::parse("/"), Route::Dashboard);
    assert_eq!(Route::parse(""), Route::Dashboard);
    assert_eq!(Route::parse("/claims"), Route::Claims);
    assert_eq!(Route::parse("/claims/"), Route::Claims);
    assert_eq!(Route::parse("/claims/new"), Route::NewClaim);
    assert_eq!(Route::parse("/claims/42"), Route::ClaimDetail(42));
    assert_eq!(Route::parse("/claims/edit/42"), Route::EditClaim(42));
    assert_eq!(Route::parse("/analytics"), Route::Analytics);
    assert_eq!(Route::parse("/forgot-password"), Route::ForgotPassword);
}

#[test]
fn test_parse_reset_token() {
    assert_eq!(
        Route::parse("/reset-password?token=abc123"),
        Route::ResetPassword {
            token: Some("abc123".to_string())
        }
    );
    assert_eq!(Route::parse("/reset-password?token="), Route::ResetPassword { token: None });
    assert_eq!(Route::parse("/reset-password"), Route::ResetPassword { token: None });
}

#[test]
fn test_unknown_and_malformed_paths_are_not_found() {
    assert_eq!(Route::parse("/nowhere"), Route::NotFound("/nowhere".to_string()));
    assert!(matches!(Route::parse("/claims/abc"), Route::NotFound(_)));
    assert!(matches!(Route::parse("/claims/0"), Route::NotFound(_)));
    assert!(matches!(Route::parse("/claims/edit/-3"), Route::NotFound(_)));
}

#[test]
fn test_path_parses_back() {
    let routes = [
        Route::Dashboard,
        Route::Claims,
        Route::ClaimDetail(9),
        Route::EditClaim(9),
        Route::NewClaim,
        Route::Customers,
        Route::ChangePassword,
        Route::ResetPassword {
            token: Some("t".to_string()),
        },
    ];
    for route in routes {
        assert_eq!(Route::parse(&route.path()), route);
    }
}

#[test]
fn test_protected_routes_resolve_to_login() {
    assert_eq!(Route::Claims.resolve(false), Route::Login);
    assert_eq!(Route::Profile.resolve(false), Route::Login);
    assert_eq!(Route::Claims.resolve(true), Route::Claims);
    assert_eq!(Route::Register.resolve(false), Route::Register);
    assert_eq!(Route::Help.resolve(false), Route::Help);
}

#[test]
fn test_sidebar_index_follows_section() {
    assert_eq!(Route::Claims.sidebar_index(), Some(1));
    assert_eq!(Route::ClaimDetail(3).sidebar_index(), Some(1));
    assert_eq!(Route::EditClaim(3).sidebar_index(), Some(1));
    assert_eq!(Route::ChangePassword.sidebar_index(), Route::Profile.sidebar_index());
    assert_eq!(Route::Login.sidebar_index(), None);
}

#[test]
fn test_token_store_persists_and_clears() {
    let dir = std::env::temp_dir().join("claimdesk_test_token");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("token");

    let store = TokenStore::persistent(&path).unwrap();
    assert!(!store.is_authenticated());

    store.save("abc").unwrap();
    assert_eq!(store.load().as_deref(), Some("abc"));

    let reopened = TokenStore::persistent(&path).unwrap();
    assert_eq!(reopened.load().as_deref(), Some("abc"));

    reopened.clear().unwrap();
    assert!(!path.exists());
    assert!(TokenStore::persistent(&path).unwrap().load().is_none());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_in_memory_token_is_shared_between_clones() {
    let store = TokenStore::in_memory();
    let clone = store.clone();
    store.save("xyz").unwrap();
    assert!(clone.is_authenticated());
    clone.clear().unwrap();
    assert!(!store.is_authenticated());
}

use super::*;

struct FixedSession {
    authenticated: bool,
    admin: bool,
}

#[async_trait::async_trait]
impl SessionView for FixedSession {
    async fn ensure_initialized(&self) {}

    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn is_admin(&self) -> bool {
        self.admin
    }
}

const ANONYMOUS: FixedSession = FixedSession { authenticated: false, admin: false };
const MEMBER: FixedSession = FixedSession { authenticated: true, admin: false };

fn admin_table() -> RouteTable {
    RouteTable::new(
        "/admin/",
        vec![
            RouteRecord::page("/login", "Login", RouteMeta::PUBLIC),
            RouteRecord::page("/", "Dashboard", RouteMeta::ADMIN),
            RouteRecord::page("/users", "Users", RouteMeta::ADMIN),
        ],
    )
}

fn enforced(policy: GuardPolicy) -> RouteGuard {
    RouteGuard::new(GuardMode::Enforced, policy)
}

const POLICY: GuardPolicy = GuardPolicy {
    login_path: "/login",
    home_path: "/",
    forbidden_path: "/login",
    guest_only: &["/login"],
};

// =============================================================
// normalize
// =============================================================

#[test]
fn normalize_strips_query_fragment_and_trailing_slash() {
    let table = RouteTable::new("/", vec![]);
    assert_eq!(table.normalize("/chat/?tab=1#top"), "/chat");
    assert_eq!(table.normalize("chat"), "/chat");
    assert_eq!(table.normalize("/"), "/");
    assert_eq!(table.normalize(""), "/");
}

#[test]
fn normalize_strips_history_base() {
    let table = admin_table();
    assert_eq!(table.normalize("/admin/users"), "/users");
    assert_eq!(table.normalize("/admin"), "/");
    assert_eq!(table.normalize("/admin/"), "/");
    assert_eq!(table.normalize("/users"), "/users");
    assert_eq!(table.normalize("/administrators"), "/administrators");
}

// =============================================================
// navigate
// =============================================================

#[tokio::test]
async fn navigate_unknown_path_is_not_found() {
    let router = Router::new(admin_table(), enforced(POLICY));
    let err = router.navigate("/nope", &ANONYMOUS).await.unwrap_err();
    assert_eq!(err, NavigationError::NotFound("/nope".to_owned()));
}

#[tokio::test]
async fn navigate_follows_guard_redirect_to_login() {
    let router = Router::new(admin_table(), enforced(POLICY));
    let resolved = router.navigate("/admin/users?page=2", &ANONYMOUS).await.unwrap();
    assert_eq!(resolved.path, "/login");
    assert_eq!(resolved.name, Some("Login"));
    assert_eq!(resolved.redirected_from.as_deref(), Some("/users"));
}

#[tokio::test]
async fn navigate_direct_hit_has_no_redirect_origin() {
    let router = Router::new(admin_table(), enforced(POLICY));
    let resolved = router.navigate("/login", &ANONYMOUS).await.unwrap();
    assert_eq!(resolved.path, "/login");
    assert_eq!(resolved.redirected_from, None);
}

#[tokio::test]
async fn navigate_follows_record_redirect_before_guard() {
    let table = RouteTable::new(
        "/",
        vec![RouteRecord::redirect("/", "/chat"), RouteRecord::page("/chat", "Chat", RouteMeta::AUTH)],
    );
    let router = Router::new(table, RouteGuard::new(GuardMode::Disabled, POLICY));
    let resolved = router.navigate("/", &ANONYMOUS).await.unwrap();
    assert_eq!(resolved.path, "/chat");
    assert_eq!(resolved.redirected_from.as_deref(), Some("/"));
}

#[tokio::test]
async fn navigate_detects_redirect_loop() {
    // An authenticated non-admin is sent from `/` to `/login` and back.
    let router = Router::new(admin_table(), enforced(POLICY));
    let err = router.navigate("/", &MEMBER).await.unwrap_err();
    assert_eq!(err, NavigationError::RedirectLoop("/".to_owned()));
}

#[tokio::test]
async fn set_guard_mode_disables_checks() {
    let mut router = Router::new(admin_table(), enforced(POLICY));
    router.set_guard_mode(GuardMode::Disabled);
    let resolved = router.navigate("/users", &ANONYMOUS).await.unwrap();
    assert_eq!(resolved.path, "/users");
    assert_eq!(router.guard().mode, GuardMode::Disabled);
}

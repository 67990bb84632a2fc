use crate::middleware::RoleRequirement;
use shared::domain::LOGIN_PATH;

#[derive(Debug, Clone)]
pub struct RouteDef {
    pub path: &'static str,
    pub title: &'static str,
    pub requirement: RoleRequirement,
    pub public: bool,
}

impl RouteDef {
    fn protected(path: &'static str, title: &'static str, requirement: RoleRequirement) -> Self {
        Self {
            path,
            title,
            requirement,
            public: false,
        }
    }

    fn public(path: &'static str, title: &'static str) -> Self {
        Self {
            path,
            title,
            requirement: RoleRequirement::Any,
            public: true,
        }
    }

    fn matches(&self, path: &str) -> bool {
        path == self.path
            || path
                .strip_prefix(self.path)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::dashboard()
    }
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDef>) -> Self {
        Self { routes }
    }

    pub fn dashboard() -> Self {
        Self::new(vec![
            RouteDef::public(LOGIN_PATH, "Login"),
            RouteDef::protected("/dashboard", "Painel", RoleRequirement::one("admin")),
            RouteDef::protected(
                "/pis",
                "Pedidos de insercao",
                RoleRequirement::any_of(["admin", "executivo"]),
            ),
            RouteDef::protected("/pis/nova", "Nova PI", RoleRequirement::one("executivo")),
            RouteDef::protected(
                "/campanhas",
                "Campanhas",
                RoleRequirement::any_of(["executivo", "opec"]),
            ),
            RouteDef::protected(
                "/agencias",
                "Agencias",
                RoleRequirement::any_of(["executivo", "financeiro"]),
            ),
            RouteDef::protected(
                "/anunciantes",
                "Anunciantes",
                RoleRequirement::any_of(["executivo", "financeiro"]),
            ),
            RouteDef::protected("/executivos", "Executivos", RoleRequirement::one("admin")),
            RouteDef::protected(
                "/produtos",
                "Produtos",
                RoleRequirement::any_of(["admin", "opec"]),
            ),
            RouteDef::protected("/faturamento", "Faturamento", RoleRequirement::one("financeiro")),
            RouteDef::protected("/entregas", "Entregas", RoleRequirement::one("opec")),
            RouteDef::protected("/perfil", "Perfil", RoleRequirement::Any),
        ])
    }

    pub fn routes(&self) -> &[RouteDef] {
        &self.routes
    }

    /// Matches on the path component only; the longest matching route wins.
    pub fn resolve(&self, location: &str) -> Option<&RouteDef> {
        let path = normalize_path(location);
        self.routes
            .iter()
            .filter(|route| route.matches(&path))
            .max_by_key(|route| route.path.len())
    }
}

pub fn normalize_path(location: &str) -> String {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    let trimmed = path.trim_end_matches('/');

    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

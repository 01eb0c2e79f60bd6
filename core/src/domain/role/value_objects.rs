use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CreateRoleInput {
    pub name: String,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRoleInput {
    pub role_id: Uuid,
    pub name: Option<String>,
    pub permissions: Option<Vec<String>>,
}

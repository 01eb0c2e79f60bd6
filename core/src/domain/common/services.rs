use crate::domain::{
    common::policies::WardenPolicy, crypto::ports::HasherRepository,
    role::ports::RoleRepository, user::ports::UserRepository,
};

#[derive(Clone)]
pub struct Service<U, RO, H>
where
    U: UserRepository,
    RO: RoleRepository,
    H: HasherRepository,
{
    pub(crate) user_repository: U,
    pub(crate) role_repository: RO,
    pub(crate) hasher_repository: H,
    pub(crate) policy: WardenPolicy<U>,
}

impl<U, RO, H> Service<U, RO, H>
where
    U: UserRepository + Clone,
    RO: RoleRepository,
    H: HasherRepository,
{
    pub fn new(user_repository: U, role_repository: RO, hasher_repository: H) -> Self {
        Self {
            policy: WardenPolicy::new(user_repository.clone()),
            user_repository,
            role_repository,
            hasher_repository,
        }
    }
}

//! Branch endpoints

use shared::models::{Branch, BranchCreate, BranchFilter, BranchUpdate};

use super::{Resource, ResourceApi};

/// `/branches`
#[derive(Debug, Clone, Copy)]
pub struct Branches;

impl Resource for Branches {
    const PATH: &'static str = "/branches";

    type Item = Branch;
    type Create = BranchCreate;
    type Update = BranchUpdate;
    type Filter = BranchFilter;
}

pub type BranchesApi<'a> = ResourceApi<'a, Branches>;

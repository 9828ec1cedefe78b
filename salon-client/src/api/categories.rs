//! Service category endpoints

use shared::models::{Category, CategoryCreate, CategoryFilter, CategoryUpdate};

use super::{Resource, ResourceApi};

/// `/categories`
#[derive(Debug, Clone, Copy)]
pub struct Categories;

impl Resource for Categories {
    const PATH: &'static str = "/categories";

    type Item = Category;
    type Create = CategoryCreate;
    type Update = CategoryUpdate;
    type Filter = CategoryFilter;
}

pub type CategoriesApi<'a> = ResourceApi<'a, Categories>;

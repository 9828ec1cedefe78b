//! Salon service (treatment) endpoints

use shared::models::{Service, ServiceCreate, ServiceFilter, ServiceUpdate};

use super::{Resource, ResourceApi};

/// `/services`
#[derive(Debug, Clone, Copy)]
pub struct Services;

impl Resource for Services {
    const PATH: &'static str = "/services";

    type Item = Service;
    type Create = ServiceCreate;
    type Update = ServiceUpdate;
    type Filter = ServiceFilter;
}

pub type ServicesApi<'a> = ResourceApi<'a, Services>;

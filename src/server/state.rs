use crate::location::RegionResolver;

pub struct AppState {
    pub resolver: RegionResolver,
}

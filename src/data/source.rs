use crate::{
    data::facility::{facilities_from_file, CategoryFilter, Facility},
    traits::FacilitySource,
    Result,
};
use async_trait::async_trait;
use std::path::Path;

/// In-memory dataset; filtering happens locally
#[derive(Debug, Clone, Default)]
pub struct StaticFacilitySource {
    facilities: Vec<Facility>,
}

impl StaticFacilitySource {
    pub fn new(facilities: Vec<Facility>) -> Self {
        Self { facilities }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let facilities = facilities_from_file(path)?;
        log::info!("loaded {} facilities from {}", facilities.len(), path.display());
        Ok(Self::new(facilities))
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }
}

#[async_trait]
impl FacilitySource for StaticFacilitySource {
    async fn load(&self, filter: &CategoryFilter) -> Result<Vec<Facility>> {
        Ok(self
            .facilities
            .iter()
            .filter(|facility| filter.matches(facility))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    #[test]
    fn test_static_source_filters() {
        let source = StaticFacilitySource::new(vec![
            Facility::new(1, "A", "general", LatLng::new(37.5, 127.0)),
            Facility::new(2, "B", "clinic", LatLng::new(37.6, 127.1)),
        ]);
        assert_eq!(source.len(), 2);

        let all = tokio_test::block_on(source.load(&CategoryFilter::All)).unwrap();
        assert_eq!(all.len(), 2);

        let clinic = CategoryFilter::category("clinic");
        let clinics = tokio_test::block_on(source.load(&clinic)).unwrap();
        assert_eq!(clinics.len(), 1);
        assert_eq!(clinics[0].name, "B");
    }
}

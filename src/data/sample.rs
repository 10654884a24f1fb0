//! Built-in demo dataset around Seoul and Busan

use crate::{core::geo::LatLng, data::facility::Facility};

pub const GENERAL_HOSPITAL: &str = "general";
pub const HOSPITAL: &str = "hospital";
pub const CLINIC: &str = "clinic";

pub fn sample_facilities() -> Vec<Facility> {
    vec![
        Facility::new(
            1,
            "Seoul National University Hospital",
            GENERAL_HOSPITAL,
            LatLng::new(37.5796, 126.9990),
        )
        .with_address("101 Daehak-ro, Jongno-gu, Seoul")
        .with_capacity(1782)
        .with_phone("1588-5700")
        .with_departments([
            "Emergency",
            "Internal Medicine",
            "Surgery",
            "Pediatrics",
            "Neurology",
        ]),
        Facility::new(
            2,
            "Severance Hospital",
            GENERAL_HOSPITAL,
            LatLng::new(37.5622, 126.9408),
        )
        .with_address("50-1 Yonsei-ro, Seodaemun-gu, Seoul")
        .with_capacity(2437)
        .with_phone("1599-1004")
        .with_departments(["Emergency", "Cardiology", "Oncology", "Orthopedics"]),
        Facility::new(
            3,
            "Samsung Medical Center",
            GENERAL_HOSPITAL,
            LatLng::new(37.4881, 127.0856),
        )
        .with_address("81 Irwon-ro, Gangnam-gu, Seoul")
        .with_capacity(1979)
        .with_phone("1599-3114")
        .with_departments(["Emergency", "Oncology", "Transplant Surgery"]),
        Facility::new(
            4,
            "Asan Medical Center",
            GENERAL_HOSPITAL,
            LatLng::new(37.5269, 127.1080),
        )
        .with_address("88 Olympic-ro 43-gil, Songpa-gu, Seoul")
        .with_capacity(2715)
        .with_phone("1688-7575")
        .with_departments(["Emergency", "Cardiology", "Pediatrics", "Neurosurgery"]),
        Facility::new(
            5,
            "Jongno Family Clinic",
            CLINIC,
            LatLng::new(37.5730, 126.9794),
        )
        .with_address("12 Jong-ro, Jongno-gu, Seoul")
        .with_capacity(10)
        .with_departments(["Family Medicine"]),
        Facility::new(
            6,
            "Mapo Community Hospital",
            HOSPITAL,
            LatLng::new(37.5663, 126.9019),
        )
        .with_address("25 World Cup-ro, Mapo-gu, Seoul")
        .with_capacity(180)
        .with_departments(["Internal Medicine", "Orthopedics", "Rehabilitation"]),
        Facility::new(
            7,
            "Pusan National University Hospital",
            GENERAL_HOSPITAL,
            LatLng::new(35.1009, 129.0192),
        )
        .with_address("179 Gudeok-ro, Seo-gu, Busan")
        .with_capacity(1232)
        .with_phone("1577-7000")
        .with_departments(["Emergency", "Internal Medicine", "Trauma Surgery"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_ids_unique_and_valid() {
        let facilities = sample_facilities();
        let ids: HashSet<_> = facilities.iter().map(|f| f.id).collect();
        assert_eq!(ids.len(), facilities.len());
        assert!(facilities.iter().all(|f| f.position.is_valid()));
    }
}

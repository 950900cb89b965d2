//! Companies and the equipment maintained for them.
//!
//! The app receives one [`Directory`] at startup and reads companies,
//! cities and devices only through it:
//! - Bundled company list (seed.rs)
//! - REST-backed company list (api.rs)
//!
//! Devices are derived from their company deterministically, so the
//! same company always lists the same equipment.

mod api;
mod seed;

use serde::{Deserialize, Serialize};

pub use api::{ApiClient, ApiDirectory, ApiError, NewCompany};
pub use seed::SeedDirectory;

/// Sandbox device listed ahead of every company's equipment.
pub const SANDBOX_DEVICE_ID: &str = "real-san-device";

const OTHER_CITY: &str = "기타";

const CITY_PREFIXES: [(&str, &str); 12] = [
    ("서울특별시", "서울"),
    ("부산광역시", "부산"),
    ("대구광역시", "대구"),
    ("인천광역시", "인천"),
    ("세종특별자치시", "세종"),
    ("경기도", "경기"),
    ("충청북도", "충북"),
    ("충청남도", "충남"),
    ("전라북도", "전북"),
    ("전라남도", "전남"),
    ("경상북도", "경북"),
    ("경상남도", "경남"),
];

const MDS_MODELS: [(&str, &str); 4] = [
    ("MDS-9710", "Cisco MDS 9710 Director"),
    ("MDS-9148S", "Cisco MDS 9148S Fabric Switch"),
    ("MDS-9250i", "Cisco MDS 9250i Multiservice Switch"),
    ("MDS-9396S", "Cisco MDS 9396S Fabric Switch"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    Online,
    Offline,
    Maintenance,
}

impl DeviceStatus {
    pub fn label(self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
            DeviceStatus::Maintenance => "maintenance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub company_id: String,
    pub model: String,
    pub address: String,
    pub status: DeviceStatus,
}

/// Read-only source of companies and their devices.
pub trait Directory {
    fn companies(&self) -> &[Company];

    /// Sorted, de-duplicated city names.
    fn cities(&self) -> Vec<String> {
        cities_of(self.companies())
    }

    fn company(&self, id: &str) -> Option<&Company> {
        self.companies().iter().find(|company| company.id == id)
    }

    fn devices(&self, company_id: &str) -> Vec<Device> {
        let Some(position) = self
            .companies()
            .iter()
            .position(|company| company.id == company_id)
        else {
            return Vec::new();
        };
        devices_for_company(&self.companies()[position], position)
    }
}

/// Map an address to its short city name by province prefix.
pub fn city_from_address(address: &str) -> &'static str {
    let address = address.trim_start();
    CITY_PREFIXES
        .iter()
        .find(|(prefix, _)| address.starts_with(prefix))
        .map(|(_, city)| *city)
        .unwrap_or(OTHER_CITY)
}

pub fn cities_of(companies: &[Company]) -> Vec<String> {
    let mut cities: Vec<String> = companies.iter().map(|c| c.city.clone()).collect();
    cities.sort();
    cities.dedup();
    cities
}

/// Companies whose name or city contains `query` (case-insensitive),
/// optionally limited to one city.
pub fn filter_companies<'a>(
    companies: &'a [Company],
    query: &str,
    city: Option<&str>,
) -> Vec<&'a Company> {
    let query = query.trim().to_lowercase();
    companies
        .iter()
        .filter(|company| city.map_or(true, |city| company.city == city))
        .filter(|company| {
            query.is_empty()
                || company.name.to_lowercase().contains(&query)
                || company.city.to_lowercase().contains(&query)
        })
        .collect()
}

/// The sandbox device followed by four MDS switches for `company`.
///
/// `index` is the company's position in its directory and only feeds
/// the generated addresses and statuses.
pub fn devices_for_company(company: &Company, index: usize) -> Vec<Device> {
    let mut devices = vec![sandbox_device()];
    let subnet = (index % 250) + 1;
    for (slot, (suffix, model)) in MDS_MODELS.iter().enumerate() {
        let number = slot + 1;
        devices.push(Device {
            id: format!("{}-mds{number}", company.id),
            name: format!("{}-{suffix}", company.name),
            company_id: company.id.clone(),
            model: (*model).to_string(),
            address: format!("10.{subnet}.0.{}", 10 + number),
            status: status_for(index, slot),
        });
    }
    devices
}

pub fn sandbox_device() -> Device {
    Device {
        id: SANDBOX_DEVICE_ID.to_string(),
        name: "Real SAN (NX-API Test)".to_string(),
        company_id: "nxapi-sandbox".to_string(),
        model: "Cisco NX-OS Sandbox".to_string(),
        address: "sbx-nxos-mgmt.cisco.com".to_string(),
        status: DeviceStatus::Online,
    }
}

fn status_for(company_index: usize, slot: usize) -> DeviceStatus {
    match (company_index * 7 + slot * 3) % 10 {
        0 => DeviceStatus::Offline,
        1 | 2 => DeviceStatus::Maintenance,
        _ => DeviceStatus::Online,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(id: &str, name: &str, address: &str) -> Company {
        Company {
            id: id.to_string(),
            name: name.to_string(),
            address: address.to_string(),
            city: city_from_address(address).to_string(),
        }
    }

    #[test]
    fn city_from_address_uses_province_prefix() {
        assert_eq!(city_from_address("서울특별시 중구 세종대로 124"), "서울");
        assert_eq!(city_from_address("경기도 평택시 고덕면"), "경기");
        assert_eq!(city_from_address("전라북도 전주시 덕진구 기지로 120"), "전북");
        assert_eq!(city_from_address("제주특별자치도 제주시"), "기타");
        assert_eq!(city_from_address(""), "기타");
    }

    #[test]
    fn cities_are_sorted_and_unique() {
        let companies = vec![
            company("company-1", "A", "서울특별시 강남구"),
            company("company-2", "B", "부산광역시 연제구"),
            company("company-3", "C", "서울특별시 중구"),
        ];
        assert_eq!(cities_of(&companies), vec!["부산".to_string(), "서울".to_string()]);
    }

    #[test]
    fn filter_matches_name_or_city_case_insensitively() {
        let companies = vec![
            company("company-1", "NHN KCP", "경기도 성남시"),
            company("company-2", "GKL", "서울특별시 강남구"),
        ];
        let names = |found: Vec<&Company>| -> Vec<String> {
            found.into_iter().map(|c| c.name.clone()).collect()
        };
        assert_eq!(names(filter_companies(&companies, "kcp", None)), vec!["NHN KCP"]);
        assert_eq!(names(filter_companies(&companies, "서울", None)), vec!["GKL"]);
        assert_eq!(filter_companies(&companies, "", None).len(), 2);
        assert_eq!(
            names(filter_companies(&companies, "", Some("경기"))),
            vec!["NHN KCP"]
        );
        assert!(filter_companies(&companies, "gkl", Some("경기")).is_empty());
    }

    #[test]
    fn devices_are_derived_from_company() {
        let company = company("company-3", "GKL", "서울특별시 강남구");
        let devices = devices_for_company(&company, 2);
        assert_eq!(devices.len(), 5);
        assert_eq!(devices[0].id, SANDBOX_DEVICE_ID);
        assert_eq!(devices[1].id, "company-3-mds1");
        assert_eq!(devices[1].name, "GKL-MDS-9710");
        assert_eq!(devices[4].model, "Cisco MDS 9396S Fabric Switch");
        assert!(devices[1..].iter().all(|d| d.company_id == "company-3"));
        assert_eq!(devices, devices_for_company(&company, 2));
    }
}

//! Report - Dashboard and Statistics Aggregations
//!
//! Group counts keep first-seen key order so chart labels follow the data.

use hashlink::LinkedHashMap;
use serde::Serialize;

use crate::domain::employee::Employee;
use crate::domain::maintenance::{MaintenanceRecord, MaintenanceStatus};
use crate::domain::room::Room;

/// Ordered label -> count mapping
pub type GroupCounts = LinkedHashMap<String, usize>;

/// Count items per key, keys in first-seen order
pub fn group_count_by_key<T, K>(items: &[T], key: impl Fn(&T) -> K) -> GroupCounts
where
    K: Into<String>,
{
    let mut counts = GroupCounts::new();
    for item in items {
        let key = key(item).into();
        match counts.get_mut(&key) {
            Some(count) => *count += 1,
            None => {
                counts.insert(key, 1);
            }
        }
    }
    counts
}

pub fn employees_by_department(employees: &[Employee]) -> GroupCounts {
    group_count_by_key(employees, |e| e.department.clone())
}

pub fn rooms_by_type(rooms: &[Room]) -> GroupCounts {
    group_count_by_key(rooms, |r| r.room_type.clone())
}

pub fn maintenance_by_type(records: &[MaintenanceRecord]) -> GroupCounts {
    group_count_by_key(records, |m| m.kind.clone())
}

/// Records per `YYYY-MM` month, sorted ascending
pub fn maintenance_by_month(records: &[MaintenanceRecord]) -> Vec<(String, usize)> {
    let mut months: Vec<_> = group_count_by_key(records, MaintenanceRecord::report_month)
        .into_iter()
        .collect();
    months.sort_by(|a, b| a.0.cmp(&b.0));
    months
}

/// Occupancy of one building
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingOccupancy {
    pub building: String,
    pub occupied: usize,
    pub total: usize,
}

impl BuildingOccupancy {
    /// Occupied share in percent, 0 for an empty building
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.occupied as f64 * 100.0 / self.total as f64
    }
}

/// Occupancy per building, buildings in first-seen order
pub fn occupancy_by_building(rooms: &[Room]) -> Vec<BuildingOccupancy> {
    let mut stats: LinkedHashMap<&str, BuildingOccupancy> = LinkedHashMap::new();
    for room in rooms {
        if stats.get(room.building_name.as_str()).is_none() {
            stats.insert(
                room.building_name.as_str(),
                BuildingOccupancy {
                    building: room.building_name.clone(),
                    occupied: 0,
                    total: 0,
                },
            );
        }
        if let Some(entry) = stats.get_mut(room.building_name.as_str()) {
            entry.total += 1;
            if room.is_assigned() {
                entry.occupied += 1;
            }
        }
    }
    stats.into_iter().map(|(_, v)| v).collect()
}

/// Headline numbers for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_employees: usize,
    pub total_rooms: usize,
    pub occupied_rooms: usize,
    pub pending_maintenance: usize,
}

impl DashboardStats {
    pub fn compute(employees: &[Employee], rooms: &[Room], records: &[MaintenanceRecord]) -> Self {
        Self {
            total_employees: employees.len(),
            total_rooms: rooms.len(),
            occupied_rooms: rooms.iter().filter(|r| r.is_assigned()).count(),
            pending_maintenance: records
                .iter()
                .filter(|m| m.status == MaintenanceStatus::Pending)
                .count(),
        }
    }

    pub fn vacant_rooms(&self) -> usize {
        self.total_rooms.saturating_sub(self.occupied_rooms)
    }
}

/// The `limit` most recently reported records, newest first
pub fn recent_maintenance(records: &[MaintenanceRecord], limit: usize) -> Vec<&MaintenanceRecord> {
    let mut sorted: Vec<_> = records.iter().collect();
    // Stable sort keeps insertion order among same-day reports
    sorted.sort_by(|a, b| b.report_date.cmp(&a.report_date));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed;

    fn pairs(counts: &GroupCounts) -> Vec<(&str, usize)> {
        counts.iter().map(|(k, v)| (k.as_str(), *v)).collect()
    }

    #[test]
    fn test_group_count_keeps_first_seen_order() {
        let words = ["b", "a", "b", "c", "a", "b"];
        let counts = group_count_by_key(&words, |w| *w);
        assert_eq!(pairs(&counts), [("b", 3), ("a", 2), ("c", 1)]);
        let none: [&str; 0] = [];
        assert!(group_count_by_key(&none, |w| *w).is_empty());
    }

    #[test]
    fn test_seed_group_counts() {
        let counts = employees_by_department(&seed::employees());
        assert_eq!(
            pairs(&counts),
            [("行政部", 2), ("人力资源部", 2), ("技术部", 2), ("市场部", 2), ("财务部", 2)]
        );

        let counts = rooms_by_type(&seed::rooms());
        assert_eq!(pairs(&counts), [("单人间", 9), ("双人间", 3), ("家庭间", 2), ("豪华套间", 1)]);

        let counts = maintenance_by_type(&seed::maintenance_records());
        assert_eq!(
            pairs(&counts),
            [("水电维修", 5), ("家具维修", 3), ("电器维修", 3), ("门窗维修", 2), ("其他", 2)]
        );
    }

    #[test]
    fn test_occupancy_by_building() {
        let occupancy = occupancy_by_building(&seed::rooms());
        let summary: Vec<_> = occupancy
            .iter()
            .map(|b| (b.building.as_str(), b.occupied, b.total))
            .collect();
        assert_eq!(summary, [("A栋", 3, 5), ("B栋", 4, 4), ("C栋", 3, 6)]);
        assert_eq!(occupancy[0].rate(), 60.0);
        assert_eq!(occupancy[1].rate(), 100.0);

        let empty = BuildingOccupancy {
            building: "D栋".into(),
            occupied: 0,
            total: 0,
        };
        assert_eq!(empty.rate(), 0.0);
    }

    #[test]
    fn test_maintenance_by_month_sorted() {
        let mut records = seed::maintenance_records();
        records.reverse();
        let months = maintenance_by_month(&records);
        let months: Vec<_> = months.iter().map(|(m, c)| (m.as_str(), *c)).collect();
        assert_eq!(months, [("2023-06", 2), ("2023-07", 5), ("2023-08", 5), ("2023-09", 3)]);
    }

    #[test]
    fn test_dashboard_stats() {
        let stats = DashboardStats::compute(
            &seed::employees(),
            &seed::rooms(),
            &seed::maintenance_records(),
        );
        assert_eq!(
            stats,
            DashboardStats {
                total_employees: 10,
                total_rooms: 15,
                occupied_rooms: 10,
                pending_maintenance: 6,
            }
        );
        assert_eq!(stats.vacant_rooms(), 5);
    }

    #[test]
    fn test_recent_maintenance() {
        let records = seed::maintenance_records();
        let ids: Vec<_> = recent_maintenance(&records, 5).iter().map(|m| m.id).collect();
        assert_eq!(ids, [15, 14, 13, 12, 11]);
        assert_eq!(recent_maintenance(&records, 50).len(), 15);
    }
}

//! Seed - Fixed Demo Data
//!
//! Loaded on first start and by `reset()`.

use chrono::NaiveDate;

use super::employee::Employee;
use super::maintenance::{MaintenanceRecord, MaintenanceStatus};
use super::room::Room;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn employee(
    id: u32,
    name: &str,
    gender: &str,
    age: u8,
    phone: &str,
    department: &str,
    position: &str,
    entry: NaiveDate,
) -> Employee {
    Employee {
        id,
        name: name.to_string(),
        department: department.to_string(),
        position: position.to_string(),
        employee_id: format!("EMP{id:03}"),
        gender: Some(gender.to_string()),
        age: Some(age),
        phone: Some(phone.to_string()),
        entry_date: Some(entry),
    }
}

/// Ten employees, ids 1..=10
pub fn employees() -> Vec<Employee> {
    vec![
        employee(1, "张三", "男", 32, "13800138001", "行政部", "部门经理", date(2018, 1, 15)),
        employee(2, "李四", "女", 28, "13900139002", "人力资源部", "人事专员", date(2019, 3, 20)),
        employee(3, "王五", "男", 35, "13700137003", "技术部", "高级工程师", date(2017, 6, 10)),
        employee(4, "赵六", "女", 26, "13600136004", "市场部", "市场专员", date(2020, 2, 15)),
        employee(5, "钱七", "男", 40, "13500135005", "财务部", "会计", date(2016, 9, 1)),
        employee(6, "孙八", "女", 29, "13400134006", "技术部", "初级工程师", date(2021, 4, 10)),
        employee(7, "周九", "男", 36, "13300133007", "行政部", "行政专员", date(2019, 8, 15)),
        employee(8, "吴十", "女", 31, "13200132008", "人力资源部", "招聘专员", date(2020, 3, 1)),
        employee(9, "郑十一", "男", 33, "13100131009", "市场部", "市场经理", date(2018, 5, 20)),
        employee(10, "王十二", "女", 27, "13000130010", "财务部", "出纳", date(2021, 2, 15)),
    ]
}

const SINGLE: &str = "单人间";
const DOUBLE: &str = "双人间";
const FAMILY: &str = "家庭间";
const SUITE: &str = "豪华套间";

const SINGLE_KIT: &str = "独立卫浴、空调、书桌";
const DOUBLE_KIT: &str = "独立卫浴、空调、书桌*2";
const FAMILY_KIT: &str = "独立卫浴、空调、书桌、厨房";
const SUITE_KIT: &str = "独立卫浴、空调、书桌、会客厅、厨房";

/// Fifteen rooms across three buildings; ten are occupied
pub fn rooms() -> Vec<Room> {
    vec![
        Room::new(1, "A栋", 1, "A101", SINGLE, SINGLE_KIT),
        Room::new(2, "A栋", 1, "A102", SINGLE, SINGLE_KIT).with_occupant(1),
        Room::new(3, "A栋", 1, "A103", DOUBLE, DOUBLE_KIT).with_occupant(3),
        Room::new(4, "A栋", 2, "A201", SINGLE, SINGLE_KIT).with_occupant(5),
        Room::new(5, "A栋", 2, "A202", DOUBLE, DOUBLE_KIT),
        Room::new(6, "B栋", 1, "B101", SINGLE, SINGLE_KIT).with_occupant(2),
        Room::new(7, "B栋", 1, "B102", FAMILY, FAMILY_KIT).with_occupant(4),
        Room::new(8, "B栋", 2, "B201", SINGLE, SINGLE_KIT).with_occupant(6),
        Room::new(9, "B栋", 2, "B202", DOUBLE, DOUBLE_KIT).with_occupant(7),
        Room::new(10, "C栋", 1, "C101", SUITE, SUITE_KIT).with_occupant(9),
        Room::new(11, "C栋", 1, "C102", SINGLE, SINGLE_KIT),
        Room::new(12, "C栋", 2, "C201", FAMILY, FAMILY_KIT).with_occupant(8),
        Room::new(13, "C栋", 2, "C202", SINGLE, SINGLE_KIT).with_occupant(10),
        Room::new(14, "C栋", 3, "C301", SINGLE, SINGLE_KIT),
        Room::new(15, "C栋", 3, "C302", SINGLE, SINGLE_KIT),
    ]
}

fn record(
    id: u32,
    room_id: u32,
    kind: &str,
    description: &str,
    reported: NaiveDate,
    status: MaintenanceStatus,
) -> MaintenanceRecord {
    MaintenanceRecord {
        id,
        room_id,
        kind: kind.to_string(),
        description: description.to_string(),
        report_date: reported,
        status,
        completion_date: None,
    }
}

/// Fifteen tickets reported June to September 2023
pub fn maintenance_records() -> Vec<MaintenanceRecord> {
    use MaintenanceStatus::{Completed, InProgress, Pending};

    vec![
        record(1, 2, "水电维修", "洗手间水龙头漏水", date(2023, 6, 15), Completed),
        record(2, 3, "家具维修", "书桌抽屉无法正常打开", date(2023, 6, 20), Completed),
        record(3, 7, "电器维修", "空调不制冷", date(2023, 7, 5), Pending),
        record(4, 4, "门窗维修", "窗户关不严", date(2023, 7, 10), InProgress),
        record(5, 9, "水电维修", "灯管坏了需要更换", date(2023, 7, 15), Pending),
        record(6, 10, "其他", "墙面有裂缝需要修补", date(2023, 7, 20), InProgress),
        record(7, 8, "电器维修", "电视遥控器失灵", date(2023, 7, 25), Pending),
        record(8, 13, "水电维修", "浴室下水道堵塞", date(2023, 8, 1), Completed),
        record(9, 6, "家具维修", "衣柜门铰链松动", date(2023, 8, 5), Completed),
        record(10, 12, "水电维修", "厨房水槽漏水", date(2023, 8, 10), Pending),
        record(11, 2, "电器维修", "床头灯开关失灵", date(2023, 8, 15), InProgress),
        record(12, 3, "门窗维修", "门锁损坏", date(2023, 8, 20), Pending),
        record(13, 10, "水电维修", "热水器不出热水", date(2023, 9, 1), Completed),
        record(14, 4, "其他", "墙面霉变需要重新粉刷", date(2023, 9, 5), Pending),
        record(15, 9, "家具维修", "床板断裂", date(2023, 9, 10), InProgress),
    ]
}

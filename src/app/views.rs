//! Views - Plain-Text Rendering
//!
//! Each page renders to any `Write` so output can be captured in tests.

use std::io::Write;

use crate::domain::auth::Session;
use crate::domain::employee::Employee;
use crate::domain::maintenance::MaintenanceRecord;
use crate::domain::room::Room;
use crate::error::Result;
use crate::eventing::Notification;
use crate::i18n::{Locale, tr, tr_format};
use crate::state::query::{occupant_of, room_label, room_of};
use crate::state::report::{BuildingOccupancy, DashboardStats, GroupCounts};

use super::navigation::Page;

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn heading(out: &mut impl Write, locale: Locale, page: Page) -> Result<()> {
    let title = tr(locale, page.title_key());
    writeln!(out, "== {title} ==")?;
    Ok(())
}

pub fn notification(out: &mut impl Write, notification: &Notification) -> Result<()> {
    writeln!(
        out,
        "[{}] {} {}",
        notification.kind.label(),
        notification.timestamp.format("%H:%M:%S"),
        notification.message
    )?;
    Ok(())
}

pub fn session(out: &mut impl Write, locale: Locale, session: &Session) -> Result<()> {
    let role = tr(locale, &format!("role.{}", session.role.as_str()));
    writeln!(
        out,
        "{}",
        tr_format(
            locale,
            "session.summary",
            &[("user", session.username.as_str()), ("role", role.as_str())],
        )
    )?;
    let pages: Vec<String> = Page::visible_for(session.role)
        .iter()
        .map(|p| tr(locale, p.title_key()))
        .collect();
    writeln!(out, "{}: {}", tr(locale, "session.pages"), pages.join(", "))?;
    Ok(())
}

pub fn dashboard(
    out: &mut impl Write,
    locale: Locale,
    stats: &DashboardStats,
    recent: &[&MaintenanceRecord],
    rooms: &[Room],
) -> Result<()> {
    heading(out, locale, Page::Dashboard)?;
    writeln!(out, "{:<16}{}", tr(locale, "dashboard.employees"), stats.total_employees)?;
    writeln!(out, "{:<16}{}", tr(locale, "dashboard.rooms"), stats.total_rooms)?;
    writeln!(out, "{:<16}{}", tr(locale, "dashboard.occupied"), stats.occupied_rooms)?;
    writeln!(out, "{:<16}{}", tr(locale, "dashboard.vacant"), stats.vacant_rooms())?;
    writeln!(out, "{:<16}{}", tr(locale, "dashboard.pending"), stats.pending_maintenance)?;
    writeln!(out)?;
    writeln!(out, "{}", tr(locale, "dashboard.recent"))?;
    maintenance_rows(out, locale, recent, rooms)
}

pub fn employees(
    out: &mut impl Write,
    locale: Locale,
    employees: &[&Employee],
    rooms: &[Room],
) -> Result<()> {
    heading(out, locale, Page::Employees)?;
    for e in employees {
        let room = room_of(rooms, e.id)
            .map(Room::label)
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:>4}  {:<8} {:<10} {:<10} {:<12} {:<12} {}",
            e.id,
            e.employee_id,
            e.name,
            e.department,
            e.position,
            opt(&e.phone),
            room
        )?;
    }
    writeln!(out, "{}", tr_format(locale, "list.count", &[("count", employees.len().to_string().as_str())]))?;
    Ok(())
}

pub fn rooms(
    out: &mut impl Write,
    locale: Locale,
    rooms: &[&Room],
    employees: &[Employee],
) -> Result<()> {
    heading(out, locale, Page::Accommodations)?;
    for r in rooms {
        let occupant = occupant_of(employees, r)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:>4}  {:<10} {:>2}F  {:<8} {:<10} {:<10} {}",
            r.id,
            r.label(),
            r.floor,
            r.room_type,
            tr(locale, r.status().label_key()),
            occupant,
            r.facilities
        )?;
    }
    writeln!(out, "{}", tr_format(locale, "list.count", &[("count", rooms.len().to_string().as_str())]))?;
    Ok(())
}

pub fn available(out: &mut impl Write, locale: Locale, employees: &[&Employee]) -> Result<()> {
    writeln!(out, "{}", tr(locale, "room.available_employees"))?;
    for e in employees {
        writeln!(out, "{:>4}  {:<8} {}", e.id, e.employee_id, e.name)?;
    }
    Ok(())
}

fn maintenance_rows(
    out: &mut impl Write,
    locale: Locale,
    records: &[&MaintenanceRecord],
    rooms: &[Room],
) -> Result<()> {
    for m in records {
        let completed = m
            .completion_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:>4}  {:<10} {:<8} {:<10} {}  {:<10} {}",
            m.id,
            room_label(rooms, m.room_id),
            m.kind,
            tr(locale, m.status.label_key()),
            m.report_date,
            completed,
            m.description
        )?;
    }
    Ok(())
}

pub fn maintenance(
    out: &mut impl Write,
    locale: Locale,
    records: &[&MaintenanceRecord],
    rooms: &[Room],
) -> Result<()> {
    heading(out, locale, Page::Maintenance)?;
    maintenance_rows(out, locale, records, rooms)?;
    writeln!(out, "{}", tr_format(locale, "list.count", &[("count", records.len().to_string().as_str())]))?;
    Ok(())
}

fn counts(out: &mut impl Write, title: &str, counts: &GroupCounts) -> Result<()> {
    writeln!(out, "{title}")?;
    for (label, count) in counts.iter() {
        writeln!(out, "  {label:<12} {count}")?;
    }
    Ok(())
}

pub struct StatisticsView<'a> {
    pub by_department: &'a GroupCounts,
    pub by_room_type: &'a GroupCounts,
    pub occupancy: &'a [BuildingOccupancy],
    pub by_maintenance_type: &'a GroupCounts,
    pub by_month: &'a [(String, usize)],
}

pub fn statistics(out: &mut impl Write, locale: Locale, view: &StatisticsView<'_>) -> Result<()> {
    heading(out, locale, Page::Statistics)?;
    counts(out, &tr(locale, "stats.by_department"), view.by_department)?;
    counts(out, &tr(locale, "stats.by_room_type"), view.by_room_type)?;

    writeln!(out, "{}", tr(locale, "stats.occupancy"))?;
    for b in view.occupancy {
        writeln!(out, "  {:<12} {:>5.1}%  ({}/{})", b.building, b.rate(), b.occupied, b.total)?;
    }

    counts(out, &tr(locale, "stats.by_maintenance_type"), view.by_maintenance_type)?;

    writeln!(out, "{}", tr(locale, "stats.by_month"))?;
    for (month, count) in view.by_month {
        writeln!(out, "  {month:<12} {count}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).expect("render");
        String::from_utf8_lossy(&out).into_owned()
    }

    #[test]
    fn test_employee_rows_show_their_room() {
        let employees = seed::employees();
        let rooms = seed::rooms();
        let list: Vec<&Employee> = employees.iter().collect();
        let text = render(|out| self::employees(out, Locale::En, &list, &rooms));

        // Employee 1 lives in A栋 A102 in the seed data
        let first = text.lines().nth(1).expect("first row");
        assert!(first.contains("张三"));
        assert!(first.contains("A栋 A102"));
        assert!(text.contains("10 item(s)"));
    }

    #[test]
    fn test_orphaned_ticket_renders_unknown_room() {
        let mut records = seed::maintenance_records();
        records.truncate(1);
        records[0].room_id = 999;
        let list: Vec<&MaintenanceRecord> = records.iter().collect();
        let text = render(|out| maintenance(out, Locale::En, &list, &[]));
        assert!(text.contains("unknown"));
    }
}

// inventory/tests/test_helpers/fixtures.rs

use chrono::NaiveDate;
use inventory::error::InventoryError;
use inventory::types::{Company, Computer};
use inventory::InventoryRuntime;

/// The companies and computer ids created by [`populate`]
#[allow(dead_code)]
pub struct Inventory {
    pub apple: Company,
    pub ibm: Company,
    pub macbook: i64,
    pub surface: i64,
    pub apple_ii: i64,
    pub ibm_pc: i64,
}

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

/// Creates two companies with a few computers, one of which has no manufacturer
#[allow(dead_code)]
pub fn populate(runtime: &InventoryRuntime) -> Result<Inventory, InventoryError> {
    let companies = runtime.company_service();
    let computers = runtime.computer_service();

    let apple = companies.create("Apple Inc.")?;
    let ibm = companies.create("IBM")?;

    let macbook = computers.create(
        &Computer::new("MacBook Pro")
            .introduced(date(2006, 1, 10))
            .company_id(Some(apple.id)),
    )?;
    let surface = computers.create(&Computer::new("Surface"))?;
    let apple_ii = computers.create(
        &Computer::new("Apple II")
            .introduced(date(1977, 4, 1))
            .discontinued(date(1993, 10, 1))
            .company_id(Some(apple.id)),
    )?;
    let ibm_pc = computers.create(
        &Computer::new("IBM PC")
            .introduced(date(1981, 8, 12))
            .company_id(Some(ibm.id)),
    )?;

    Ok(Inventory {
        apple,
        ibm,
        macbook: id_of(&macbook)?,
        surface: id_of(&surface)?,
        apple_ii: id_of(&apple_ii)?,
        ibm_pc: id_of(&ibm_pc)?,
    })
}

fn id_of(computer: &Computer) -> Result<i64, InventoryError> {
    computer
        .id
        .ok_or_else(|| InventoryError::InvalidState("created computer has no id".to_string()))
}

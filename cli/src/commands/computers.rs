use inventory::error::InventoryError;
use inventory::input::{parse_date, parse_id};
use inventory::pagination::Pagination;
use inventory::query::{page_size_from_token, ComputerQuery};
use inventory::types::{Computer, ComputerView};
use inventory::InventoryRuntime;
use log::debug;

use crate::cli::{ComputerFields, Computers, Del, Show, UpdateComputer};

pub fn list(runtime: &InventoryRuntime, opts: &Computers) -> Result<(), InventoryError> {
    let configured = runtime.config().listing.page_size.to_string();
    let size = page_size_from_token(opts.size.as_deref().or(Some(configured.as_str())));
    let query = ComputerQuery::from_pagination(Pagination::new(opts.page, size)?)
        .search(opts.search.as_deref())
        .sort_by_tokens(opts.sort.as_deref(), opts.order.as_deref());
    debug!("Listing computers with {query:?}");

    let listing = runtime.computer_service().list(&query)?;
    print_header();
    for view in listing.page.items() {
        println!("{view}");
    }
    println!(
        "Page {} of {}, {} computers found",
        listing.page.page_index() + 1,
        listing.total_pages().max(1),
        listing.total
    );
    Ok(())
}

pub fn show(runtime: &InventoryRuntime, opts: &Show) -> Result<(), InventoryError> {
    let computer = runtime.computer_service().find(parse_id(&opts.id)?)?;
    println!("{}", ComputerView::from(&computer));
    Ok(())
}

pub fn add(runtime: &InventoryRuntime, fields: &ComputerFields) -> Result<(), InventoryError> {
    let computer = runtime.computer_service().create(&computer_from(fields)?)?;
    println!("Added {}", ComputerView::from(&computer));
    Ok(())
}

pub fn update(runtime: &InventoryRuntime, opts: &UpdateComputer) -> Result<(), InventoryError> {
    let computer = computer_from(&opts.fields)?.with_id(parse_id(&opts.id)?);
    let computer = runtime.computer_service().update(&computer)?;
    println!("Updated {}", ComputerView::from(&computer));
    Ok(())
}

pub fn delete(runtime: &InventoryRuntime, opts: &Del) -> Result<(), InventoryError> {
    let removed = runtime.computer_service().delete_selection(&opts.ids)?;
    println!("{removed} computers deleted");
    Ok(())
}

fn computer_from(fields: &ComputerFields) -> Result<Computer, InventoryError> {
    let company_id = fields.company.as_deref().map(parse_id).transpose()?;
    Ok(Computer::new(fields.name.trim())
        .introduced(parse_date(fields.introduced.as_deref().unwrap_or(""))?)
        .discontinued(parse_date(fields.discontinued.as_deref().unwrap_or(""))?)
        .company_id(company_id))
}

fn print_header() {
    println!(
        "{:>5} {:<40} {:<10} {:<10} {}",
        "Id", "Name", "Introduced", "Discont.", "Company"
    );
}

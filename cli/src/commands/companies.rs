use inventory::error::InventoryError;
use inventory::input::parse_id;
use inventory::pagination::Pagination;
use inventory::InventoryRuntime;

use crate::cli::{AddCompany, Companies, DelCompany};

pub fn list(runtime: &InventoryRuntime, opts: &Companies) -> Result<(), InventoryError> {
    let service = runtime.company_service();
    if opts.all {
        for company in service.list_all()? {
            println!("{:>6} {}", company.id, company.name);
        }
        return Ok(());
    }

    let size = opts
        .size
        .unwrap_or(runtime.config().listing.page_size);
    let page = service.list_page(Pagination::new(opts.page, size)?)?;
    let total = service.count()?;
    for company in page.items() {
        println!("{:>6} {}", company.id, company.name);
    }
    println!(
        "Page {} of {}, {} companies in total",
        page.page_index() + 1,
        page.total_pages(total).max(1),
        total
    );
    if let Some(next) = page.next_index() {
        println!("Next page: companies --page {next} --size {size}");
    }
    Ok(())
}

pub fn add(runtime: &InventoryRuntime, opts: &AddCompany) -> Result<(), InventoryError> {
    let company = runtime.company_service().create(&opts.name)?;
    println!("Added company {} with id {}", company.name, company.id);
    Ok(())
}

pub fn delete(runtime: &InventoryRuntime, opts: &DelCompany) -> Result<(), InventoryError> {
    let id = parse_id(&opts.id)?;
    let outcome = runtime.company_service().delete(id)?;
    if outcome.company_removed {
        println!(
            "Company {id} deleted together with {} computers",
            outcome.computers_removed
        );
    } else {
        println!("No company with id {id}, nothing deleted");
    }
    Ok(())
}

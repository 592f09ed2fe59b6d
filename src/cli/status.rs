use crate::db::{count_rows, get_connection, DB_FILE};
use crate::error::Result;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = data_dir.join(DB_FILE);

    println!("Data dir:     {}", data_dir.display());
    println!("Database:     {}", db_path.display());
    println!("Active user:  {}", settings.active_user.as_deref().unwrap_or("(not set)"));

    if db_path.exists() {
        let conn = get_connection(&db_path)?;
        println!();
        println!("Users:         {}", count_rows(&conn, "users")?);
        println!("Categories:    {}", count_rows(&conn, "categories")?);
        println!("Transactions:  {}", count_rows(&conn, "transactions")?);
        println!("Budgets:       {}", count_rows(&conn, "budgets")?);
    } else {
        println!();
        println!("Database not found. Run `fintrack init` to set up.");
    }

    Ok(())
}

//! Terminal front-end for the role admin surface. Rich-text descriptions
//! are read from files, since they are produced by an external editor.

use std::env;
use std::process::ExitCode;

use log::error;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use etheses_data::admin::{self, RoleForm};
use etheses_data::db::Database;
use etheses_data::err::DataError;

const USAGE: &str = "usage: role-admin <command>
  list                             show all roles
  search <term>                    match roles by id or name substring
  filter <name>                    match roles by exact name
  show <id>                        show one role
  add <name> <description-file>    create a role
  edit <id> <description-file>     replace a role's description
  rename <id> <name>               rename a role
  delete <id>                      delete a role (refused while in use)";

#[tokio::main]
async fn main() -> ExitCode {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("failed to initialize the logger");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), DataError> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        println!("{}", USAGE);
        return Ok(());
    }

    let database = Database::from_env().await?;
    let pool = &database.db;

    match (args[0].as_str(), &args[1..]) {
        ("list", []) => {
            print_json(&admin::list(pool).await?);
        }
        ("search", [term]) => {
            print_json(&admin::search(pool, term).await?);
        }
        ("filter", [name]) => {
            print_json(&admin::filter_by_name(pool, name).await?);
        }
        ("show", [id]) => match admin::get(pool, parse_id(id)?).await? {
            Some(role) => print_json(&role),
            None => println!("no role with id {}", id),
        },
        ("add", [name, description_file]) => {
            let description = std::fs::read_to_string(description_file)?;
            let role_id = RoleForm {
                id: None,
                name: name.clone(),
                description,
            }
            .save(pool)
            .await?;
            println!("created role {}", role_id);
        }
        ("edit", [id, description_file]) => {
            let role_id = parse_id(id)?;
            let role = admin::get(pool, role_id)
                .await?
                .ok_or(DataError::Sqlx(sqlx::Error::RowNotFound))?;
            let description = std::fs::read_to_string(description_file)?;
            RoleForm {
                id: Some(role_id),
                name: role.name,
                description,
            }
            .save(pool)
            .await?;
            println!("updated role {}", role_id);
        }
        ("rename", [id, name]) => {
            let role_id = parse_id(id)?;
            let role = admin::get(pool, role_id)
                .await?
                .ok_or(DataError::Sqlx(sqlx::Error::RowNotFound))?;
            RoleForm {
                id: Some(role_id),
                name: name.clone(),
                description: role.description,
            }
            .save(pool)
            .await?;
            println!("renamed role {}", role_id);
        }
        ("delete", [id]) => {
            admin::remove(pool, parse_id(id)?).await?;
            println!("deleted role {}", id);
        }
        _ => {
            println!("{}", USAGE);
        }
    }

    Ok(())
}

fn parse_id(raw: &str) -> Result<i64, DataError> {
    raw.parse()
        .map_err(|_| DataError::InvalidForm(format!("'{}' is not a valid id", raw)))
}

fn print_json<T: serde::Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).expect("failed to serialize output")
    );
}

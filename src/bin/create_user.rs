use std::{error::Error, io, process::exit};

use bcrypt::DEFAULT_COST;
use clap::Parser;
use rusqlite::Connection;

use profiteur_rs::{PasswordHash, ValidatedPassword, create_account, create_user, initialize_db};

/// A utility for registering a user along with their initial account.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The username to sign in with.
    #[arg(long)]
    username: String,

    /// The user's email address.
    #[arg(long)]
    email: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let conn = Connection::open(&args.db_path)
        .unwrap_or_else(|_| panic!("Could not open the database at {:?}", args.db_path));
    initialize_db(&conn)?;

    let password_hash = match get_password_hash() {
        Some(password_hash) => password_hash,
        None => return Ok(()),
    };

    let user = match create_user(&args.username, &args.email, password_hash, &conn) {
        Ok(user) => user,
        Err(error) => {
            print_error(format!("Could not create user: {error}"));
            exit(1);
        }
    };

    if let Err(error) = create_account(user.id, &args.username, &args.email, None, &conn) {
        print_error(format!("Could not create account: {error}"));
        exit(1);
    }

    println!("Created user {} <{}>", args.username, args.email);

    Ok(())
}

fn get_password_hash() -> Option<PasswordHash> {
    loop {
        println!();

        let first_password = match rpassword::prompt_password("Enter a password: ") {
            Ok(string) => string,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                return None;
            }
            Err(error) => {
                print_error(format!("Could not read password from stdin: {error}"));
                return None;
            }
        };

        let validated_password = match ValidatedPassword::new(&first_password) {
            Ok(validated_password) => validated_password,
            Err(error) => {
                print_error(error);
                continue;
            }
        };

        let second_password = match rpassword::prompt_password("Enter the same password again: ") {
            Ok(string) => string,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                return None;
            }
            Err(error) => {
                print_error(format!("Could not read password from stdin: {error}"));
                return None;
            }
        };

        if first_password != second_password {
            print_error("Passwords must match, try again.");
            continue;
        }

        let password_hash = match PasswordHash::new(validated_password, DEFAULT_COST) {
            Ok(password_hash) => password_hash,
            Err(error) => {
                print_error(format!("Could not hash password: {error}. Try again."));
                continue;
            }
        };

        return Some(password_hash);
    }
}

fn print_error(error: impl ToString) {
    eprintln!(
        "\x1b[31;1m{}\x1b[0m",
        capitalise_first_char(&error.to_string())
    )
}

/// From https://crates.io/crates/capitalize
fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return String::with_capacity(0);
    };
    first.to_uppercase().chain(chars).collect()
}

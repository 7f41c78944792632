//! Plain-text view.
//!
//! [`View`] renders an [`AppState`] the way the catalog page lays it out:
//! header with the cart count, the two selectors, the product grid (or the
//! loading/error text in its place) and the cart list. [`parse_command`]
//! turns a line of user input into the intent it stands for.

use std::fmt;

use thiserror::Error;

use crate::domain::events::Intent;
use crate::domain::value_objects::{CategoryFilter, ProductId, SortOrder, SortOrderError};
use crate::state::{AppState, LoadStatus};

pub const HELP: &str = "\
commands:
  category <label>   filter by category (`all` clears the filter)
  sort asc|desc      order by price
  add <id>           add a visible product to the cart
  remove <id>        remove every cart entry with that id
  show               render the page again
  help               this text
  quit               leave";

/// What a line of input asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("`{0}` is not a product id")]
    InvalidId(String),

    #[error(transparent)]
    InvalidSort(#[from] SortOrderError),
}

/// Parse one line of input. Blank lines mean `show`.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" | "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "category" | "cat" => {
            if rest.is_empty() { return Err(CommandError::MissingArgument("category")); }
            Command::Intent(Intent::SelectCategory(CategoryFilter::from_label(rest)))
        }
        "sort" => {
            if rest.is_empty() { return Err(CommandError::MissingArgument("sort")); }
            Command::Intent(Intent::SelectSort(rest.parse()?))
        }
        "add" => Command::Intent(Intent::AddToCart(parse_id("add", rest)?)),
        "remove" | "rm" => Command::Intent(Intent::RemoveFromCart(parse_id("remove", rest)?)),
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn parse_id(command: &'static str, arg: &str) -> Result<ProductId, CommandError> {
    if arg.is_empty() { return Err(CommandError::MissingArgument(command)); }
    arg.parse().map_err(|_| CommandError::InvalidId(arg.to_string()))
}

/// Renders the whole page for one state snapshot.
pub struct View<'a>(pub &'a AppState);

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;

        writeln!(f, "Products{:>40}", format!("Cart: {}", state.cart().size()))?;
        writeln!(f)?;

        write!(f, "Category:")?;
        for category in state.categories() {
            if category == state.category() { write!(f, " [{category}]")?; } else { write!(f, " {category}")?; }
        }
        writeln!(f)?;

        write!(f, "Sort:")?;
        for sort in SortOrder::ALL {
            if sort == state.sort() { write!(f, " [{}]", sort.label())?; } else { write!(f, " {}", sort.label())?; }
        }
        writeln!(f)?;
        writeln!(f)?;

        match state.status() {
            LoadStatus::Loading => writeln!(f, "Loading...")?,
            LoadStatus::Failed(message) => writeln!(f, "Error: {message}")?,
            LoadStatus::Loaded if state.visible().is_empty() => writeln!(f, "No products")?,
            LoadStatus::Loaded => {
                for p in state.visible() {
                    writeln!(f, "#{} {}", p.id(), p.title())?;
                    writeln!(f, "    {}", p.image())?;
                    writeln!(f, "    {}", p.category())?;
                    writeln!(f, "    {}    [add {}]", p.price(), p.id())?;
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "Cart Items")?;
        if state.cart().is_empty() {
            writeln!(f, "  Cart is empty")?;
        } else {
            for item in state.cart().entries() {
                writeln!(f, "  {}    [remove {}]", item.title(), item.id())?;
            }
        }
        Ok(())
    }
}

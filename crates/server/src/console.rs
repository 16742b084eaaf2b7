//! Interactive console menu.
//!
//! A sequential loop over the same [`CustomerStore`] the web routes use:
//! print the menu, read one line, run the chosen action, repeat until the
//! user quits or input ends. Store failures are reported and the loop goes on.
//!
//! Input comes through a [`LineReader`] and output goes to any `AsyncWrite`,
//! so the loop never blocks the runtime and tests can script a session.

use std::io::{self, BufRead};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Stdout};
use tokio::sync::mpsc;

use crm_core::{CustomerUpdate, NewCustomer};

use crate::db::{self, CustomerStore, StoreError};

const MENU: &str = " Welcome to the CRM

    What would you like to do?

    1. Create a customer
    2. View all customers
    3. Update a customer
    4. Delete a customer
    5. Quit
";

/// Source of input lines for the console.
#[async_trait]
pub trait LineReader: Send {
    /// Read the next line without its line ending. `None` at end of input.
    async fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Lines from any async buffered reader.
pub struct AsyncLines<R> {
    reader: R,
}

impl<R> AsyncLines<R> {
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }
}

#[async_trait]
impl<R> LineReader for AsyncLines<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = Vec::new();
        if self.reader.read_until(b'\n', &mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(decode_line(&line)))
    }
}

/// Lossy UTF-8 decode with the line ending stripped.
///
/// Undecodable bytes become U+FFFD, so a bad line is ordinary (invalid) input.
fn decode_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\r', '\n'])
        .to_owned()
}

/// Lines from the process's stdin, read on a dedicated thread.
///
/// Blocking reads happen off the runtime, so a pending prompt never holds up
/// request handling or shutdown.
pub struct StdinLines {
    lines: mpsc::Receiver<io::Result<String>>,
}

impl StdinLines {
    /// Start the reader thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn() -> io::Result<Self> {
        let (tx, rx) = mpsc::channel(1);

        std::thread::Builder::new()
            .name("console-stdin".to_string())
            .spawn(move || {
                let mut stdin = io::stdin().lock();
                let mut line = Vec::new();
                loop {
                    line.clear();
                    let next = match stdin.read_until(b'\n', &mut line) {
                        Ok(0) => break,
                        Ok(_) => Ok(decode_line(&line)),
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => Err(e),
                    };
                    if tx.blocking_send(next).is_err() {
                        break;
                    }
                }
            })?;

        Ok(Self { lines: rx })
    }
}

#[async_trait]
impl LineReader for StdinLines {
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        self.lines.recv().await.transpose()
    }
}

/// Menu entries, keyed by the literal text the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Create,
    List,
    Update,
    Delete,
    Quit,
}

impl MenuChoice {
    /// Parse a menu selection. Surrounding whitespace is ignored.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Create),
            "2" => Some(Self::List),
            "3" => Some(Self::Update),
            "4" => Some(Self::Delete),
            "5" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Whether the loop keeps running after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// The console menu loop.
pub struct Console<R, W> {
    store: Arc<dyn CustomerStore>,
    input: R,
    output: W,
}

impl Console<StdinLines, Stdout> {
    /// Console wired to the process's stdin and stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the stdin reader thread cannot be spawned.
    pub fn stdio(store: Arc<dyn CustomerStore>) -> io::Result<Self> {
        Ok(Self::new(store, StdinLines::spawn()?, tokio::io::stdout()))
    }
}

impl<R, W> Console<R, W>
where
    R: LineReader,
    W: AsyncWrite + Unpin + Send,
{
    #[must_use]
    pub fn new(store: Arc<dyn CustomerStore>, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Run the menu until the user quits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails. Store
    /// errors are printed and the loop continues.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            self.say(MENU).await?;

            let Some(selection) = self.prompt("Choose an action(1-5): ").await? else {
                tracing::info!("Console input closed, leaving menu");
                return Ok(());
            };

            let flow = match MenuChoice::parse(&selection) {
                Some(MenuChoice::Create) => self.create_customer().await?,
                Some(MenuChoice::List) => self.view_all_customers().await?,
                Some(MenuChoice::Update) => self.update_customer().await?,
                Some(MenuChoice::Delete) => self.delete_customer().await?,
                Some(MenuChoice::Quit) => {
                    self.say("Exiting...").await?;
                    Flow::Stop
                }
                None => {
                    self.say("Invalid option. Please choose a valid action (1-5).")
                        .await?;
                    Flow::Continue
                }
            };

            if flow == Flow::Stop {
                return Ok(());
            }
        }
    }

    async fn create_customer(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Enter customer's name: ").await? else {
            return Ok(Flow::Stop);
        };
        let Some(age) = self.prompt("Enter customer's age: ").await? else {
            return Ok(Flow::Stop);
        };

        let Ok(customer) = NewCustomer::parse(Some(name), Some(age)) else {
            self.say("Both name and age are required!").await?;
            return Ok(Flow::Continue);
        };

        self.say(&format!(
            "Creating customer: Name = {}, Age = {}",
            customer.name(),
            customer.age()
        ))
        .await?;

        match self.store.create(customer).await {
            Ok(created) => self.say(&format!("Customer created: {created}")).await?,
            Err(e) => self.report("creating customer", &e).await?,
        }
        Ok(Flow::Continue)
    }

    async fn view_all_customers(&mut self) -> io::Result<Flow> {
        match self.store.list().await {
            Ok(customers) => {
                self.say("All customers:").await?;
                for (index, customer) in customers.iter().enumerate() {
                    self.say(&format!(
                        "{}. Name: {}, Age: {}",
                        index + 1,
                        customer.name,
                        customer.age
                    ))
                    .await?;
                }
            }
            Err(e) => self.report("retrieving customers", &e).await?,
        }
        Ok(Flow::Continue)
    }

    async fn update_customer(&mut self) -> io::Result<Flow> {
        let Some(id) = self
            .prompt("Enter the ID of the customer to update: ")
            .await?
        else {
            return Ok(Flow::Stop);
        };
        let Some(name) = self.prompt("Enter the new customer's name: ").await? else {
            return Ok(Flow::Stop);
        };
        let Some(age) = self.prompt("Enter the new customer's age: ").await? else {
            return Ok(Flow::Stop);
        };

        let update = CustomerUpdate::from_input(&name, &age);
        if update.is_empty() {
            self.say("No new name or age given; keeping the stored values.")
                .await?;
        }
        let result = match db::parse_id(&id) {
            Ok(id) => self.store.update(id, update).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(Some(customer)) => self.say(&format!("Customer updated: {customer}")).await?,
            Ok(None) => self.say("Customer not found.").await?,
            Err(e) => self.report("updating customer", &e).await?,
        }
        Ok(Flow::Continue)
    }

    async fn delete_customer(&mut self) -> io::Result<Flow> {
        let Some(id) = self
            .prompt("Enter the ID of the customer to delete: ")
            .await?
        else {
            return Ok(Flow::Stop);
        };

        let result = match db::parse_id(&id) {
            Ok(id) => self.store.delete(id).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(Some(customer)) => self.say(&format!("Customer deleted: {customer}")).await?,
            Ok(None) => self.say("Customer not found.").await?,
            Err(e) => self.report("deleting customer", &e).await?,
        }
        Ok(Flow::Continue)
    }

    /// Print a prompt (no newline) and read the answer.
    async fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.output.write_all(prompt.as_bytes()).await?;
        self.output.flush().await?;
        self.input.read_line().await
    }

    /// Print one line.
    async fn say(&mut self, line: &str) -> io::Result<()> {
        self.output.write_all(line.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }

    async fn report(&mut self, action: &str, error: &StoreError) -> io::Result<()> {
        tracing::error!(error = %error, action, "Console action failed");
        self.say(&format!("Error {action}: {error}")).await
    }
}

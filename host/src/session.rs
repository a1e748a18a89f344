//! One registry session: store, registration form and status board
//!
//! Everything runs on a single task. The status board subscribes to the
//! store, so a freshly registered business is tracked before the
//! registration response is produced.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use registry_shared::{
    BusinessStore, RegistrationFlow, RegistrationInput, RegistryStatistics, StoreEvent,
    ViewConfig,
};
use uuid::Uuid;

use crate::error::{HostError, HostResult};
use crate::protocol::{BusinessView, Command, Response};
use crate::refresh::StatusBoard;

type Clock = Rc<dyn Fn() -> DateTime<Utc>>;

pub struct Session {
    store: BusinessStore,
    flow: RegistrationFlow,
    board: Rc<RefCell<StatusBoard>>,
    config: ViewConfig,
    clock: Clock,
}

impl Session {
    /// Create a session on the system clock
    pub fn new(config: ViewConfig) -> Self {
        Self::with_clock(config, Utc::now)
    }

    /// Create a session reading time from `clock`
    pub fn with_clock<F>(config: ViewConfig, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + 'static,
    {
        let clock: Clock = Rc::new(clock);
        let board = Rc::new(RefCell::new(StatusBoard::new(config.expiring_soon_days)));
        let mut store = BusinessStore::new();

        let sink = Rc::clone(&board);
        let now = Rc::clone(&clock);
        store.subscribe(move |event| match event {
            StoreEvent::BusinessAdded { business, total } => {
                sink.borrow_mut().track(business, now());
                tracing::debug!(total, "Status board updated");
            }
        });

        Self {
            store,
            flow: RegistrationFlow::new(),
            board,
            config,
            clock,
        }
    }

    pub fn store(&self) -> &BusinessStore {
        &self.store
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Number of businesses with a tracked status
    pub fn tracked(&self) -> usize {
        self.board.borrow().len()
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Parse and execute one protocol line
    pub fn handle_line(&mut self, line: &str) -> Response {
        match Command::parse(line) {
            Ok(command) => self.handle(command),
            Err(err) => err.into_response(),
        }
    }

    /// Execute one command
    pub fn handle(&mut self, command: Command) -> Response {
        let result = match command {
            Command::Submit { input } => Ok(self.submit(input)),
            Command::List => Ok(self.list()),
            Command::Get { id } => self.get(&id),
            Command::Count { name } => Ok(Response::Count {
                count: self.store.count_by_name(&name),
                name,
            }),
            Command::Statistics => Ok(self.statistics()),
        };

        result.unwrap_or_else(HostError::into_response)
    }

    fn submit(&mut self, input: RegistrationInput) -> Response {
        match self.flow.submit(&mut self.store, input) {
            Ok(business) => Response::Registered {
                business: BusinessView::new(&business, self.now(), &self.config),
            },
            Err(errors) => Response::invalid(errors, self.config.language),
        }
    }

    fn list(&self) -> Response {
        let now = self.now();
        Response::Businesses {
            businesses: self
                .store
                .list()
                .iter()
                .map(|b| BusinessView::new(b, now, &self.config))
                .collect(),
        }
    }

    fn get(&self, id: &str) -> HostResult<Response> {
        let id = Uuid::parse_str(id.trim()).map_err(|_| HostError::InvalidId(id.to_string()))?;
        let business = self
            .store
            .get_by_id(&id)
            .ok_or_else(|| HostError::NotFound(id.to_string()))?;

        Ok(Response::Business {
            business: BusinessView::new(business, self.now(), &self.config),
        })
    }

    fn statistics(&self) -> Response {
        Response::Statistics {
            statistics: RegistryStatistics::compute_with_threshold(
                self.store.list(),
                self.now(),
                self.config.expiring_soon_days,
            ),
        }
    }

    /// Recompute time-dependent statuses; returns one event per transition
    pub fn refresh(&mut self) -> Vec<Response> {
        let now = self.now();
        self.board
            .borrow_mut()
            .refresh(self.store.list(), now)
            .into_iter()
            .map(|change| Response::StatusChanged {
                business_id: change.business_id,
                name: change.name,
                previous: change.previous,
                current: change.current,
            })
            .collect()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("store", &self.store)
            .field("flow", &self.flow)
            .field("board", &self.board)
            .field("config", &self.config)
            .finish()
    }
}

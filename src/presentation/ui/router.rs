//! Named screen destinations.

use crate::infrastructure::config::InitialRoute;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
}

impl Route {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Home => "Home",
        }
    }
}

impl From<InitialRoute> for Route {
    fn from(route: InitialRoute) -> Self {
        match route {
            InitialRoute::Login => Self::Login,
            InitialRoute::Home => Self::Home,
        }
    }
}

/// Stack of routes. The top is the mounted screen.
#[derive(Debug, Clone)]
pub struct Router {
    stack: Vec<Route>,
}

impl Router {
    #[must_use]
    pub fn new(initial: Route) -> Self {
        Self {
            stack: vec![initial],
        }
    }

    #[must_use]
    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::Login)
    }

    /// Pushes `route`. Returns false if it is already mounted.
    pub fn navigate(&mut self, route: Route) -> bool {
        if self.current() == route {
            return false;
        }
        self.stack.push(route);
        true
    }

    /// Pops the current route. Returns false at the root.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }
}

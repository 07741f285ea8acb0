//! Simulated management console implementing [`Browser`].
//!
//! The console keeps two copies of the resource pool inventory: what the
//! backend holds and what the UI lists. They only converge on
//! [`MockConsole::sync_inventory`], which is what a provider relationship
//! refresh triggers. The document is rebuilt on page transitions and reloads
//! only; opening dropdowns or accordions changes it in place.

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};

use infra_pages::{
    base::{BaseLoggedInPage, LoginPage},
    infrastructure::resource_pool::views::ResourcePoolDetailsToolbar,
};
use infra_pages_utils::ApplianceVersion;
use infra_pages_widgets::{
    Accordion, BreadCrumb, Browser, BrowserError, Button, Dropdown, Element, EntitiesList,
    FlashMessages, Locator, NavigationMenu, Paginator, Search, SummaryTable, TextInput, Tree,
    ViewSelector,
};

use crate::dom::{Action, Dom, Node};

pub const DELETED_MESSAGE: &str = "The selected Resource Pools was deleted";
pub const LOGIN_FAILED_MESSAGE: &str = "Sorry, the username or password you entered is incorrect.";
pub const REMOVE_CONFIRMATION: &str =
    "Warning: The selected Resource Pool and ALL of their components will be permanently removed!";

const MENU_ITEMS: [&str; 6] = [
    "Overview",
    "Dashboard",
    "Compute",
    "Infrastructure",
    "Providers",
    "Resource Pools",
];
const VIEW_MODES: [&str; 3] = ["Grid View", "Tile View", "List View"];
const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockUser {
    pub username: String,
    pub password: String,
    pub display_name: String,
}

impl MockUser {
    pub fn new(username: &str, password: &str, display_name: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

/// Backend data of one resource pool, as shown in its summary tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolRecord {
    pub name: String,
    pub properties: Vec<(String, String)>,
    pub relationships: Vec<(String, String)>,
    pub smart_management: Vec<(String, String)>,
}

fn pairs(rows: &[(&str, &str)]) -> Vec<(String, String)> {
    rows.iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn upsert(rows: &mut Vec<(String, String)>, key: &str, value: &str) {
    match rows.iter_mut().find(|(k, _)| k == key) {
        Some((_, v)) => *v = value.to_string(),
        None => rows.push((key.to_string(), value.to_string())),
    }
}

impl PoolRecord {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            properties: pairs(&[
                ("Default Resource Pool", "No"),
                ("Memory Reserve", "0 MB"),
                ("Memory Reserve Expand", "True"),
                ("Memory Limit", "Unlimited"),
                ("Memory Shares", "163840"),
                ("Memory Shares Level", "normal"),
                ("CPU Reserve", "0"),
                ("CPU Reserve Expand", "True"),
                ("CPU Limit", "Unlimited"),
                ("CPU Shares", "4000"),
                ("CPU Shares Level", "normal"),
            ]),
            relationships: pairs(&[
                ("Parent Datacenter", "Datacenter"),
                ("Parent Cluster", "Cluster"),
                ("Parent Host", "None"),
                ("Direct VMs", "0"),
                ("All VMs", "0"),
                ("All Templates", "0"),
            ]),
            smart_management: pairs(&[(
                "My Company Tags",
                "No My Company Tags have been assigned",
            )]),
        }
    }

    pub fn with_property(mut self, key: &str, value: &str) -> Self {
        upsert(&mut self.properties, key, value);
        self
    }

    pub fn with_relationship(mut self, key: &str, value: &str) -> Self {
        upsert(&mut self.relationships, key, value);
        self
    }

    pub fn with_smart_management(mut self, key: &str, value: &str) -> Self {
        upsert(&mut self.smart_management, key, value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
    PoolList,
    PoolDetails(String),
}

impl Screen {
    fn menu_path(&self) -> &'static [&'static str] {
        match self {
            Screen::Login => &[],
            Screen::Dashboard => &["Overview", "Dashboard"],
            Screen::PoolList | Screen::PoolDetails(_) => {
                &["Compute", "Infrastructure", "Resource Pools"]
            }
        }
    }
}

/// Counters of what the console was asked to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleStats {
    pub renders: usize,
    pub gotos: usize,
    pub refreshes: usize,
    pub syncs: usize,
    pub alerts_accepted: usize,
    pub alerts_dismissed: usize,
}

#[derive(Debug, Clone)]
struct PendingAlert {
    text: String,
    pool: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    fn class(&self) -> &'static str {
        match self {
            FlashKind::Success => "alert alert-success",
            FlashKind::Error => "alert alert-danger",
        }
    }
}

#[derive(Debug)]
struct ConsoleState {
    version: ApplianceVersion,
    users: Vec<MockUser>,
    session: Option<String>,
    screen: Screen,
    inputs: HashMap<String, String>,
    backend: BTreeMap<String, PoolRecord>,
    listed: BTreeMap<String, PoolRecord>,
    page_size: usize,
    list_page: usize,
    filter: Option<String>,
    view_mode: String,
    open_dropdown: Option<String>,
    alert: Option<PendingAlert>,
    flash: Vec<(FlashKind, String)>,
    dom: Dom,
    stats: ConsoleStats,
}

impl ConsoleState {
    fn remove_label(&self) -> &'static str {
        if self.version < ApplianceVersion::new(5, 9, 0) {
            "Remove Resource Pool"
        } else {
            "Remove Resource Pool from Inventory"
        }
    }

    fn node_id(&self, element: &Element) -> Result<usize> {
        self.dom.resolve(element).ok_or_else(|| {
            BrowserError::StaleElement {
                id: element.id().to_string(),
            }
            .into()
        })
    }

    fn ensure_no_alert(&self) -> Result<()> {
        match &self.alert {
            Some(alert) => Err(BrowserError::UnexpectedAlert {
                text: alert.text.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }

    fn visible_pools(&self) -> Vec<&PoolRecord> {
        self.listed
            .values()
            .filter(|pool| match &self.filter {
                Some(filter) => pool.name.to_lowercase().contains(&filter.to_lowercase()),
                None => true,
            })
            .collect()
    }

    fn page_count(&self) -> usize {
        let total = self.visible_pools().len();
        total.div_ceil(self.page_size.max(1)).max(1)
    }

    fn transition(&mut self, screen: Screen, flash: Vec<(FlashKind, String)>) {
        log::debug!("Console: {:?} -> {:?}", self.screen, screen);
        self.screen = screen;
        self.flash = flash;
        self.render();
    }

    fn render(&mut self) {
        if let Screen::PoolDetails(name) = &self.screen {
            if !self.listed.contains_key(name) {
                let message = format!("Resource Pool \"{name}\" no longer exists");
                self.screen = Screen::PoolList;
                self.flash = vec![(FlashKind::Error, message)];
            }
        }
        self.list_page = self.list_page.min(self.page_count() - 1);
        self.open_dropdown = None;

        let mut dom = Dom::new();
        self.render_flash(&mut dom);
        match self.screen.clone() {
            Screen::Login => self.render_login(&mut dom),
            Screen::Dashboard => {
                self.render_frame(&mut dom);
                dom.add_exposed(
                    None,
                    EntitiesList::title_locator(),
                    Node::new("h1").text("Dashboard"),
                );
            }
            Screen::PoolList => {
                self.render_frame(&mut dom);
                self.render_pool_list(&mut dom);
            }
            Screen::PoolDetails(name) => {
                self.render_frame(&mut dom);
                self.render_pool_details(&mut dom, &name);
            }
        }
        self.dom = dom;
        self.stats.renders += 1;
    }

    fn render_flash(&self, dom: &mut Dom) {
        let root = dom.add_exposed(
            None,
            FlashMessages::locator(),
            Node::new("div").attr("id", "flash_msg_div"),
        );
        for (kind, text) in &self.flash {
            dom.add_exposed(
                Some(root),
                FlashMessages::message_locator(),
                Node::new("div").class(kind.class()).text(text.as_str()),
            );
        }
    }

    fn render_login(&self, dom: &mut Dom) {
        for id in ["user_name", "user_password"] {
            dom.add_exposed(
                None,
                TextInput::locator_for(id),
                Node::new("input").attr("id", id),
            );
        }
        dom.add_exposed(
            None,
            LoginPage::login_locator(),
            Node::new("a")
                .attr("id", "login")
                .text("Log In")
                .on_click(Action::Login),
        );
    }

    fn render_frame(&self, dom: &mut Dom) {
        let user = self.session.clone().unwrap_or_default();
        dom.add_exposed(
            None,
            BaseLoggedInPage::user_locator(),
            Node::new("a").attr("id", "user_menu").text(user),
        );
        dom.add_exposed(
            None,
            BaseLoggedInPage::logout_locator(),
            Node::new("a")
                .attr("id", "logout")
                .text("Logout")
                .on_click(Action::Logout),
        );

        let menu = dom.add_exposed(
            None,
            NavigationMenu::locator(),
            Node::new("div").attr("id", "main-menu"),
        );
        let active = self.screen.menu_path();
        for item in MENU_ITEMS {
            let link = dom.add_exposed(
                Some(menu),
                NavigationMenu::item_locator(item),
                Node::new("a")
                    .text(item)
                    .on_click(Action::Menu(item.to_string())),
            );
            if active.contains(&item) {
                dom.expose(Some(menu), NavigationMenu::active_locator(), &[link]);
            }
        }
    }

    fn render_dropdown(&self, dom: &mut Dom, menu: &str, items: &[&str]) {
        let root = dom.add_exposed(
            None,
            Dropdown::locator_for(menu),
            Node::new("div").class("btn-group dropdown"),
        );
        dom.add_exposed(
            Some(root),
            Dropdown::button_locator(),
            Node::new("button")
                .class("btn btn-default dropdown-toggle")
                .text(menu)
                .on_click(Action::ToggleDropdown(menu.to_string())),
        );
        for item in items {
            dom.add_exposed(
                Some(root),
                Dropdown::item_locator(),
                Node::new("a").text(*item).on_click(Action::DropdownItem {
                    menu: menu.to_string(),
                    item: item.to_string(),
                }),
            );
        }
    }

    fn render_pool_list(&self, dom: &mut Dom) {
        dom.add_exposed(
            None,
            EntitiesList::title_locator(),
            Node::new("h1").text("Resource Pools"),
        );

        self.render_dropdown(dom, "Configuration", &["Remove Resource Pools from Inventory"]);
        self.render_dropdown(dom, "Policy", &["Manage Policies", "Edit Tags", "Check Compliance"]);
        self.render_dropdown(
            dom,
            "Download",
            &["Download as Text", "Download as CSV", "Print or export as PDF"],
        );

        let selector = dom.add_exposed(
            None,
            ViewSelector::locator(),
            Node::new("div").class("toolbar-pf-view-selector"),
        );
        for mode in VIEW_MODES {
            let class = if mode == self.view_mode {
                "btn btn-link active"
            } else {
                "btn btn-link"
            };
            dom.add_exposed(
                Some(selector),
                ViewSelector::button_locator(),
                Node::new("button")
                    .class(class)
                    .attr("title", mode)
                    .on_click(Action::ViewMode(mode.to_string())),
            );
        }

        let search_value = self.inputs.get("search_text").cloned().unwrap_or_default();
        dom.add_exposed(
            None,
            Search::input_locator(),
            Node::new("input")
                .attr("id", "search_text")
                .attr("value", search_value),
        );
        dom.add_exposed(
            None,
            Search::search_button_locator(),
            Node::new("button")
                .attr("id", "searchbtn")
                .on_click(Action::Search),
        );
        if self.filter.is_some() {
            dom.add_exposed(
                None,
                Search::clear_locator(),
                Node::new("a")
                    .attr("id", "clear_search")
                    .on_click(Action::ClearSearch),
            );
        }

        let pools = self.visible_pools();
        let start = self.list_page * self.page_size;
        for pool in pools.iter().skip(start).take(self.page_size) {
            let row = dom.add_exposed(
                None,
                EntitiesList::row_locator(),
                Node::new("tr").on_click(Action::OpenPool(pool.name.clone())),
            );
            dom.add_exposed(
                Some(row),
                EntitiesList::name_locator(),
                Node::new("td").class("name").text(pool.name.as_str()),
            );
        }

        let last = self.list_page + 1 >= self.page_count();
        let paging = dom.add_exposed(
            None,
            Paginator::locator(),
            Node::new("div").attr("id", "paging_div"),
        );
        dom.add_exposed(
            Some(paging),
            Paginator::first_locator(),
            Node::new("li")
                .class(if self.list_page == 0 { "first disabled" } else { "first" })
                .on_click(Action::PagerFirst),
        );
        dom.add_exposed(
            Some(paging),
            Paginator::next_locator(),
            Node::new("li")
                .class(if last { "next disabled" } else { "next" })
                .on_click(Action::PagerNext),
        );
    }

    fn render_pool_details(&self, dom: &mut Dom, name: &str) {
        let Some(pool) = self.listed.get(name) else {
            return;
        };
        let title = format!("{name} (Summary)");
        dom.add_exposed(
            None,
            EntitiesList::title_locator(),
            Node::new("h1").text(title.as_str()),
        );

        let breadcrumb = dom.add_exposed(
            None,
            BreadCrumb::locator(),
            Node::new("ol").class("breadcrumb"),
        );
        let parent = dom.add(Node::new("li").text("Resource Pools"));
        let active = dom.add(Node::new("li").class("active").text(title.as_str()));
        dom.expose(Some(breadcrumb), BreadCrumb::location_locator(), &[parent, active]);
        dom.expose(Some(breadcrumb), BreadCrumb::active_locator(), &[active]);

        self.render_dropdown(dom, "Configuration", &[self.remove_label()]);
        self.render_dropdown(dom, "Policy", &["Manage Policies", "Edit Tags"]);
        dom.add_exposed(
            None,
            Button::title_locator(ResourcePoolDetailsToolbar::DOWNLOAD_TITLE),
            Node::new("button")
                .class("btn btn-default")
                .attr("title", ResourcePoolDetailsToolbar::DOWNLOAD_TITLE),
        );

        let relationship_nodes = pool
            .relationships
            .iter()
            .map(|(key, _)| key.as_str())
            .collect::<Vec<_>>();
        for (accordion, nodes, opened) in [
            ("Properties", vec!["Summary"], true),
            ("Relationships", relationship_nodes, false),
        ] {
            let root = dom.add_exposed(
                None,
                Accordion::locator_for(accordion),
                Node::new("div").class("panel panel-default"),
            );
            let body = dom.add_exposed(
                Some(root),
                Accordion::body_locator(),
                Node::new("div").class(if opened {
                    "panel-collapse collapse in"
                } else {
                    "panel-collapse collapse"
                }),
            );
            dom.add_exposed(
                Some(root),
                Accordion::header_locator(),
                Node::new("a")
                    .text(accordion)
                    .on_click(Action::ToggleAccordion { body }),
            );
            for node in nodes {
                dom.add_exposed(
                    Some(body),
                    Tree::node_locator(),
                    Node::new("li")
                        .class("list-group-item node")
                        .text(node)
                        .on_click(Action::TreeNode(node.to_string())),
                );
            }
        }

        for (section, rows) in [
            ("Properties", &pool.properties),
            ("Relationships", &pool.relationships),
            ("Smart Management", &pool.smart_management),
        ] {
            let table = dom.add_exposed(
                None,
                SummaryTable::locator_for(section),
                Node::new("table").class("table table-bordered"),
            );
            for (key, value) in rows {
                let row =
                    dom.add_exposed(Some(table), SummaryTable::row_locator(), Node::new("tr"));
                let label = dom.add(Node::new("td").class("label").text(key.as_str()));
                let cell = dom.add(Node::new("td").text(value.as_str()));
                dom.expose(Some(row), SummaryTable::cell_locator(), &[label, cell]);
            }
        }
    }

    fn perform(&mut self, action: Action, element: &Element) -> Result<()> {
        match action {
            Action::Login => {
                let username = self.inputs.remove("user_name").unwrap_or_default();
                let password = self.inputs.remove("user_password").unwrap_or_default();
                let user = self
                    .users
                    .iter()
                    .find(|user| user.username == username && user.password == password)
                    .cloned();
                match user {
                    Some(user) => {
                        log::info!("Console: {} logged in", user.username);
                        self.session = Some(user.display_name);
                        self.transition(Screen::Dashboard, Vec::new());
                    }
                    None => {
                        log::warn!("Console: rejected login of '{username}'");
                        self.transition(
                            Screen::Login,
                            vec![(FlashKind::Error, LOGIN_FAILED_MESSAGE.to_string())],
                        );
                    }
                }
            }
            Action::Logout => {
                self.session = None;
                self.transition(Screen::Login, Vec::new());
            }
            Action::Menu(item) => match item.as_str() {
                "Dashboard" => self.transition(Screen::Dashboard, Vec::new()),
                "Resource Pools" => {
                    self.list_page = 0;
                    self.transition(Screen::PoolList, Vec::new());
                }
                // expands a section only
                _ => {}
            },
            Action::ToggleDropdown(menu) => {
                self.open_dropdown = match self.open_dropdown.take() {
                    Some(open) if open == menu => None,
                    _ => Some(menu),
                };
            }
            Action::DropdownItem { menu, item } => {
                if self.open_dropdown.as_deref() != Some(menu.as_str()) {
                    return Err(BrowserError::NotInteractable {
                        id: element.id().to_string(),
                    }
                    .into());
                }
                self.open_dropdown = None;
                match &self.screen {
                    Screen::PoolDetails(pool) if item == self.remove_label() => {
                        self.alert = Some(PendingAlert {
                            text: REMOVE_CONFIRMATION.to_string(),
                            pool: pool.clone(),
                        });
                    }
                    _ => log::debug!("Console: '{menu}' > '{item}' does nothing here"),
                }
            }
            Action::OpenPool(name) => self.transition(Screen::PoolDetails(name), Vec::new()),
            Action::PagerFirst => {
                if self.list_page > 0 {
                    self.list_page = 0;
                    self.transition(Screen::PoolList, Vec::new());
                }
            }
            Action::PagerNext => {
                if self.list_page + 1 < self.page_count() {
                    self.list_page += 1;
                    self.transition(Screen::PoolList, Vec::new());
                }
            }
            Action::Search => {
                self.filter = self
                    .inputs
                    .get("search_text")
                    .filter(|text| !text.is_empty())
                    .cloned();
                self.list_page = 0;
                self.transition(Screen::PoolList, Vec::new());
            }
            Action::ClearSearch => {
                self.filter = None;
                self.inputs.remove("search_text");
                self.list_page = 0;
                self.transition(Screen::PoolList, Vec::new());
            }
            Action::ViewMode(mode) => {
                self.view_mode = mode;
                self.transition(Screen::PoolList, Vec::new());
            }
            Action::ToggleAccordion { body } => {
                if let Some(node) = self.dom.node_mut(body) {
                    if node.has_class("in") {
                        node.remove_class("in");
                    } else {
                        node.add_class("in");
                    }
                }
            }
            Action::TreeNode(node) => log::debug!("Console: tree node '{node}' selected"),
        }
        Ok(())
    }

    fn input_id(&self, node: usize) -> Option<String> {
        self.dom
            .node(node)
            .filter(|node| node.tag == "input")
            .and_then(|node| node.attrs.get("id").cloned())
    }
}

/// In-memory console session. Cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct MockConsole {
    state: Mutex<ConsoleState>,
}

impl MockConsole {
    /// Console of `version` with the default administrator account, showing
    /// the login page.
    pub fn new(version: ApplianceVersion) -> Self {
        let mut state = ConsoleState {
            version,
            users: vec![MockUser::new("admin", "smartvm", "Administrator")],
            session: None,
            screen: Screen::Login,
            inputs: HashMap::new(),
            backend: BTreeMap::new(),
            listed: BTreeMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
            list_page: 0,
            filter: None,
            view_mode: "List View".to_string(),
            open_dropdown: None,
            alert: None,
            flash: Vec::new(),
            dom: Dom::new(),
            stats: ConsoleStats::default(),
        };
        state.render();
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn add_user(&self, user: MockUser) {
        self.state.lock().users.push(user);
    }

    pub fn set_page_size(&self, page_size: usize) {
        self.state.lock().page_size = page_size.max(1);
    }

    /// Add a pool to the backend only; the UI lists it after the next sync.
    pub fn add_pool(&self, pool: PoolRecord) {
        self.state.lock().backend.insert(pool.name.clone(), pool);
    }

    /// Add a pool to the backend and the UI inventory at once.
    pub fn seed_pool(&self, pool: PoolRecord) {
        let mut state = self.state.lock();
        state.listed.insert(pool.name.clone(), pool.clone());
        state.backend.insert(pool.name.clone(), pool);
    }

    /// Remove a pool from the backend only.
    pub fn remove_pool(&self, name: &str) -> bool {
        self.state.lock().backend.remove(name).is_some()
    }

    /// Copy the backend inventory into the UI. The current document is kept
    /// until the next reload.
    pub fn sync_inventory(&self) {
        let mut state = self.state.lock();
        state.listed = state.backend.clone();
        state.stats.syncs += 1;
        log::debug!("Console: inventory synced ({} pool(s))", state.listed.len());
    }

    pub fn backend_has(&self, name: &str) -> bool {
        self.state.lock().backend.contains_key(name)
    }

    pub fn listed_has(&self, name: &str) -> bool {
        self.state.lock().listed.contains_key(name)
    }

    pub fn screen(&self) -> Screen {
        self.state.lock().screen.clone()
    }

    pub fn logged_in_user(&self) -> Option<String> {
        self.state.lock().session.clone()
    }

    pub fn alert_text(&self) -> Option<String> {
        self.state.lock().alert.as_ref().map(|alert| alert.text.clone())
    }

    pub fn stats(&self) -> ConsoleStats {
        self.state.lock().stats
    }
}

#[async_trait]
impl Browser for MockConsole {
    async fn goto(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.ensure_no_alert()?;
        state.stats.gotos += 1;
        log::debug!("Console: goto {url}");
        let screen = if state.session.is_some() {
            Screen::Dashboard
        } else {
            Screen::Login
        };
        state.transition(screen, Vec::new());
        Ok(())
    }

    async fn refresh(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.ensure_no_alert()?;
        state.stats.refreshes += 1;
        state.flash.clear();
        state.render();
        Ok(())
    }

    async fn find_elements(
        &self,
        locator: &Locator,
        parent: Option<&Element>,
    ) -> Result<Vec<Element>> {
        let state = self.state.lock();
        let parent = match parent {
            Some(element) => Some(state.node_id(element)?),
            None => None,
        };
        Ok(state
            .dom
            .query(parent, locator)
            .into_iter()
            .map(|id| state.dom.element(id))
            .collect())
    }

    async fn text(&self, element: &Element) -> Result<String> {
        let state = self.state.lock();
        let id = state.node_id(element)?;
        Ok(state
            .dom
            .node(id)
            .map(|node| node.text.clone())
            .unwrap_or_default())
    }

    async fn attribute(&self, element: &Element, name: &str) -> Result<Option<String>> {
        let state = self.state.lock();
        let id = state.node_id(element)?;
        if name == "value" {
            if let Some(input) = state.input_id(id) {
                return Ok(Some(state.inputs.get(&input).cloned().unwrap_or_default()));
            }
        }
        Ok(state
            .dom
            .node(id)
            .and_then(|node| node.attrs.get(name).cloned()))
    }

    async fn click(&self, element: &Element) -> Result<()> {
        let mut state = self.state.lock();
        state.ensure_no_alert()?;
        let id = state.node_id(element)?;
        let action = state.dom.node(id).and_then(|node| node.action.clone());
        match action {
            Some(action) => state.perform(action, element),
            None => Ok(()),
        }
    }

    async fn send_keys(&self, element: &Element, text: &str) -> Result<()> {
        let mut state = self.state.lock();
        let id = state.node_id(element)?;
        let input = state.input_id(id).ok_or_else(|| BrowserError::NotInteractable {
            id: element.id().to_string(),
        })?;
        state.inputs.entry(input).or_default().push_str(text);
        Ok(())
    }

    async fn clear(&self, element: &Element) -> Result<()> {
        let mut state = self.state.lock();
        let id = state.node_id(element)?;
        let input = state.input_id(id).ok_or_else(|| BrowserError::NotInteractable {
            id: element.id().to_string(),
        })?;
        state.inputs.insert(input, String::new());
        Ok(())
    }

    async fn handle_alert(&self, accept: bool) -> Result<bool> {
        let mut state = self.state.lock();
        let Some(alert) = state.alert.take() else {
            return Ok(false);
        };
        if accept {
            state.stats.alerts_accepted += 1;
            log::info!("Console: removing resource pool '{}'", alert.pool);
            state.backend.remove(&alert.pool);
            state.list_page = 0;
            state.transition(
                Screen::PoolList,
                vec![(FlashKind::Success, DELETED_MESSAGE.to_string())],
            );
        } else {
            state.stats.alerts_dismissed += 1;
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console() -> MockConsole {
        MockConsole::new(ApplianceVersion::new(5, 9, 0))
    }

    async fn login(console: &MockConsole) -> Result<()> {
        let user = console
            .find_elements(&TextInput::locator_for("user_name"), None)
            .await?;
        console.send_keys(&user[0], "admin").await?;
        let password = console
            .find_elements(&TextInput::locator_for("user_password"), None)
            .await?;
        console.send_keys(&password[0], "smartvm").await?;
        let login = console
            .find_elements(&LoginPage::login_locator(), None)
            .await?;
        console.click(&login[0]).await
    }

    #[tokio::test]
    async fn test_login_and_stale_elements() -> Result<()> {
        let console = console();
        let before = console
            .find_elements(&TextInput::locator_for("user_name"), None)
            .await?;
        login(&console).await?;
        assert_eq!(console.screen(), Screen::Dashboard);
        assert_eq!(console.logged_in_user().as_deref(), Some("Administrator"));

        let err = console.text(&before[0]).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BrowserError>(),
            Some(BrowserError::StaleElement { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_dropdown_items_need_an_open_dropdown() -> Result<()> {
        let console = console();
        console.seed_pool(PoolRecord::new("pool-a"));
        login(&console).await?;
        console.state.lock().transition(Screen::PoolDetails("pool-a".to_string()), Vec::new());

        let root = console
            .find_elements(&Dropdown::locator_for("Configuration"), None)
            .await?;
        let items = console
            .find_elements(&Dropdown::item_locator(), Some(&root[0]))
            .await?;
        let err = console.click(&items[0]).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BrowserError>(),
            Some(BrowserError::NotInteractable { .. })
        ));

        let toggle = console
            .find_elements(&Dropdown::button_locator(), Some(&root[0]))
            .await?;
        console.click(&toggle[0]).await?;
        console.click(&items[0]).await?;
        assert_eq!(console.alert_text().as_deref(), Some(REMOVE_CONFIRMATION));
        let err = console.refresh().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BrowserError>(),
            Some(BrowserError::UnexpectedAlert { .. })
        ));

        assert!(console.handle_alert(false).await?);
        assert!(!console.handle_alert(false).await?);
        assert!(console.backend_has("pool-a"));
        Ok(())
    }

    #[tokio::test]
    async fn test_inventory_follows_backend_after_sync() -> Result<()> {
        let console = console();
        console.add_pool(PoolRecord::new("pool-b"));
        assert!(console.backend_has("pool-b"));
        assert!(!console.listed_has("pool-b"));

        console.sync_inventory();
        assert!(console.listed_has("pool-b"));
        assert!(console.remove_pool("pool-b"));
        assert!(console.listed_has("pool-b"));
        assert_eq!(console.stats().syncs, 1);
        Ok(())
    }
}

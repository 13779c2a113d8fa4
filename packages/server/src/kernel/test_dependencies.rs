// TestDependencies - in-memory implementations for testing
//
// MockGateway keeps rows in memory behind a Mutex and mirrors the Postgres
// gateway's semantics (pending on insert, conditional status updates that
// keep parent counts in step, cascading parent deletes). Failures can be queued to exercise the
// upstream error path.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::traits::{BaseGateway, GatewayError, GatewayResult};
use super::ServerDeps;
use crate::common::{RecruiterId, SubmittedItemId, ToolId};
use crate::domains::moderation::models::{
    approved_delta, Aggregates, ItemFilter, ModerationStatus, NewSubmittedItem, ParentRef,
    SubmittedItem,
};
use crate::domains::moderation::SubmissionPolicy;
use crate::domains::recruiters::models::{
    CreateRecruiter, Recruiter, RecruiterFilter, UpdateRecruiter,
};
use crate::domains::tools::models::{CreateTool, Tool, ToolFilter, UpdateTool};

#[derive(Default)]
struct MockState {
    tools: Vec<Tool>,
    recruiters: Vec<Recruiter>,
    items: Vec<SubmittedItem>,
    failures: VecDeque<String>,
    failures_on: Vec<(&'static str, String)>,
    calls: Vec<&'static str>,
}

impl MockState {
    // Same outcome as the SQL adjustment, done under the one lock
    fn refresh_counts(&mut self, parent: ParentRef) {
        let counts = Aggregates::from_items(self.items.iter().filter(|i| i.parent == parent));
        let now = Utc::now();
        match parent {
            ParentRef::Tool(id) => {
                if let Some(tool) = self.tools.iter_mut().find(|t| t.id == id) {
                    tool.comment_count = counts.comment_count;
                    tool.upvote_count = counts.upvote_count;
                    tool.downvote_count = counts.downvote_count;
                    tool.updated_at = now;
                }
            }
            ParentRef::Recruiter(id) => {
                if let Some(recruiter) = self.recruiters.iter_mut().find(|r| r.id == id) {
                    recruiter.comment_count = counts.comment_count;
                    recruiter.upvote_count = counts.upvote_count;
                    recruiter.downvote_count = counts.downvote_count;
                    recruiter.updated_at = now;
                }
            }
        }
    }
}

#[derive(Clone, Default)]
pub struct MockGateway {
    state: Arc<Mutex<MockState>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next gateway call fail with `message`.
    pub fn fail_next(&self, message: &str) {
        self.state
            .lock()
            .unwrap()
            .failures
            .push_back(message.to_string());
    }

    /// Make the next call to the gateway method named `call` fail with `message`.
    pub fn fail_on(&self, call: &'static str, message: &str) {
        self.state
            .lock()
            .unwrap()
            .failures_on
            .push((call, message.to_string()));
    }

    /// Names of the gateway methods called so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn item_count(&self) -> usize {
        self.state.lock().unwrap().items.len()
    }

    /// Build ServerDeps backed by this gateway.
    pub fn deps(&self) -> ServerDeps {
        self.deps_with_policy(SubmissionPolicy::default())
    }

    pub fn deps_with_policy(&self, policy: SubmissionPolicy) -> ServerDeps {
        ServerDeps::new(Arc::new(self.clone()), policy)
    }

    fn begin(&self, call: &'static str) -> GatewayResult<std::sync::MutexGuard<'_, MockState>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if let Some(message) = state.failures.pop_front() {
            return Err(GatewayError::Backend(message));
        }
        if let Some(index) = state.failures_on.iter().position(|(name, _)| *name == call) {
            let (_, message) = state.failures_on.remove(index);
            return Err(GatewayError::Backend(message));
        }
        Ok(state)
    }
}

#[async_trait]
impl BaseGateway for MockGateway {
    async fn get_tool(&self, id: ToolId) -> GatewayResult<Option<Tool>> {
        let state = self.begin("get_tool")?;
        Ok(state.tools.iter().find(|t| t.id == id).cloned())
    }

    async fn list_tools(&self, filter: &ToolFilter) -> GatewayResult<Vec<Tool>> {
        let state = self.begin("list_tools")?;
        let mut tools: Vec<Tool> = state
            .tools
            .iter()
            .filter(|t| filter.category.is_none() || t.category == filter.category)
            .cloned()
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(tools)
    }

    async fn insert_tool(&self, input: CreateTool) -> GatewayResult<Tool> {
        let mut state = self.begin("insert_tool")?;
        let now = Utc::now();
        let tool = Tool {
            id: ToolId::new(),
            name: input.name,
            description: input.description,
            website_url: input.website_url,
            category: input.category,
            logo_url: input.logo_url,
            comment_count: 0,
            upvote_count: 0,
            downvote_count: 0,
            created_at: now,
            updated_at: now,
        };
        state.tools.push(tool.clone());
        Ok(tool)
    }

    async fn update_tool(&self, id: ToolId, input: UpdateTool) -> GatewayResult<Option<Tool>> {
        let mut state = self.begin("update_tool")?;
        let Some(tool) = state.tools.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(name) = input.name {
            tool.name = name;
        }
        if input.description.is_some() {
            tool.description = input.description;
        }
        if input.website_url.is_some() {
            tool.website_url = input.website_url;
        }
        if input.category.is_some() {
            tool.category = input.category;
        }
        if input.logo_url.is_some() {
            tool.logo_url = input.logo_url;
        }
        tool.updated_at = Utc::now();
        Ok(Some(tool.clone()))
    }

    async fn delete_tool(&self, id: ToolId) -> GatewayResult<bool> {
        let mut state = self.begin("delete_tool")?;
        let before = state.tools.len();
        state.tools.retain(|t| t.id != id);
        state.items.retain(|i| i.parent != ParentRef::Tool(id));
        Ok(state.tools.len() != before)
    }

    async fn get_recruiter(&self, id: RecruiterId) -> GatewayResult<Option<Recruiter>> {
        let state = self.begin("get_recruiter")?;
        Ok(state.recruiters.iter().find(|r| r.id == id).cloned())
    }

    async fn list_recruiters(&self, filter: &RecruiterFilter) -> GatewayResult<Vec<Recruiter>> {
        let state = self.begin("list_recruiters")?;
        let mut recruiters: Vec<Recruiter> = state
            .recruiters
            .iter()
            .filter(|r| match (&filter.company, &r.company) {
                (None, _) => true,
                (Some(wanted), Some(company)) => wanted.eq_ignore_ascii_case(company),
                (Some(_), None) => false,
            })
            .cloned()
            .collect();
        recruiters.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(recruiters)
    }

    async fn insert_recruiter(&self, input: CreateRecruiter) -> GatewayResult<Recruiter> {
        let mut state = self.begin("insert_recruiter")?;
        let now = Utc::now();
        let recruiter = Recruiter {
            id: RecruiterId::new(),
            name: input.name,
            company: input.company,
            title: input.title,
            email: input.email,
            linkedin_url: input.linkedin_url,
            specialties: input.specialties,
            comment_count: 0,
            upvote_count: 0,
            downvote_count: 0,
            created_at: now,
            updated_at: now,
        };
        state.recruiters.push(recruiter.clone());
        Ok(recruiter)
    }

    async fn update_recruiter(
        &self,
        id: RecruiterId,
        input: UpdateRecruiter,
    ) -> GatewayResult<Option<Recruiter>> {
        let mut state = self.begin("update_recruiter")?;
        let Some(recruiter) = state.recruiters.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        if let Some(name) = input.name {
            recruiter.name = name;
        }
        if input.company.is_some() {
            recruiter.company = input.company;
        }
        if input.title.is_some() {
            recruiter.title = input.title;
        }
        if input.email.is_some() {
            recruiter.email = input.email;
        }
        if input.linkedin_url.is_some() {
            recruiter.linkedin_url = input.linkedin_url;
        }
        if input.specialties.is_some() {
            recruiter.specialties = input.specialties;
        }
        recruiter.updated_at = Utc::now();
        Ok(Some(recruiter.clone()))
    }

    async fn delete_recruiter(&self, id: RecruiterId) -> GatewayResult<bool> {
        let mut state = self.begin("delete_recruiter")?;
        let before = state.recruiters.len();
        state.recruiters.retain(|r| r.id != id);
        state.items.retain(|i| i.parent != ParentRef::Recruiter(id));
        Ok(state.recruiters.len() != before)
    }

    async fn get_item(&self, id: SubmittedItemId) -> GatewayResult<Option<SubmittedItem>> {
        let state = self.begin("get_item")?;
        Ok(state.items.iter().find(|i| i.id == id).cloned())
    }

    async fn list_items(&self, filter: &ItemFilter) -> GatewayResult<Vec<SubmittedItem>> {
        let state = self.begin("list_items")?;
        // Newest first, like the SQL ordering
        Ok(state
            .items
            .iter()
            .rev()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect())
    }

    async fn insert_item(&self, input: NewSubmittedItem) -> GatewayResult<SubmittedItem> {
        let mut state = self.begin("insert_item")?;
        let parent_exists = match input.parent {
            ParentRef::Tool(id) => state.tools.iter().any(|t| t.id == id),
            ParentRef::Recruiter(id) => state.recruiters.iter().any(|r| r.id == id),
        };
        if !parent_exists {
            return Err(GatewayError::MissingParent(input.parent));
        }
        let item = SubmittedItem {
            id: SubmittedItemId::new(),
            parent: input.parent,
            submitter: input.submitter,
            payload: input.payload,
            status: ModerationStatus::Pending,
            reviewed_at: None,
            created_at: Utc::now(),
        };
        state.items.push(item.clone());
        Ok(item)
    }

    async fn update_item_status(
        &self,
        id: SubmittedItemId,
        from: ModerationStatus,
        to: ModerationStatus,
    ) -> GatewayResult<Option<SubmittedItem>> {
        let mut state = self.begin("update_item_status")?;
        let Some(item) = state
            .items
            .iter_mut()
            .find(|i| i.id == id && i.status == from)
        else {
            return Ok(None);
        };
        item.status = to;
        item.reviewed_at = Some(Utc::now());
        let updated = item.clone();
        if approved_delta(from, to) != 0 {
            state.refresh_counts(updated.parent);
        }
        Ok(Some(updated))
    }

    async fn delete_item(&self, id: SubmittedItemId) -> GatewayResult<Option<SubmittedItem>> {
        let mut state = self.begin("delete_item")?;
        let Some(index) = state.items.iter().position(|i| i.id == id) else {
            return Ok(None);
        };
        let removed = state.items.remove(index);
        if removed.status == ModerationStatus::Approved {
            state.refresh_counts(removed.parent);
        }
        Ok(Some(removed))
    }

    async fn ping(&self) -> GatewayResult<()> {
        self.begin("ping")?;
        Ok(())
    }
}

//! The single entry point for changing a learner's progress.
//!
//! Every request is validated before anything is mutated. After a mutation the states are
//! recomputed, handed to the [`Renderer`] and the new approval set is handed to the
//! [`ApprovalPersistence`].
//!
//! Un-approving is two-phase: [`Gateway::request_unapprove()`] returns a [`PendingRetraction`]
//! listing what would be lost, and nothing changes until it is committed. The pending
//! retraction borrows the gateway mutably so no other request can run while it is open.

use std::collections::BTreeSet;

use crate::approval::ApprovalStore;
use crate::cascade::{self, Retraction};
use crate::course::{CourseId, CourseStates, DisplayState};
use crate::registry::Registry;
use crate::resolver;

/// Shown before every course is cleared with [`Gateway::reset_with()`].
pub const RESET_WARNING: &str = "Reset all progress in the curriculum? This can't be undone.";

/// Reasons a request is turned down. None of them change any state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
	#[error("unknown course `{0}`")]
	UnknownCourse(CourseId),
	#[error("`{0}` is already approved")]
	AlreadyApproved(CourseId),
	#[error("`{0}` is not approved")]
	NotApproved(CourseId),
	#[error("`{0}` is locked until all of its prerequisites are approved")]
	Locked(CourseId),
}

/// Presents course states to the learner.
///
/// Receives the whole map every time, applying the same map twice must look the same as applying it once.
pub trait Renderer {
	fn render(&mut self, registry: &Registry, states: &CourseStates);
}

/// Durable storage for the approved course ids.
pub trait ApprovalPersistence {
	/// Previously saved ids. `None` when nothing was saved or it couldn't be read.
	fn load(&mut self) -> Option<BTreeSet<CourseId>>;
	fn save(&mut self, approved: &BTreeSet<CourseId>) -> crate::Result<()>;
}

/// Asks the learner a yes/no question before a destructive change.
pub trait Confirmation {
	fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirmation for F
where F: FnMut(&str) -> bool
{
	fn confirm(&mut self, message: &str) -> bool {
		self(message)
	}
}

impl<T: Renderer + ?Sized> Renderer for &mut T {
	fn render(&mut self, registry: &Registry, states: &CourseStates) {
		(**self).render(registry, states)
	}
}

impl<T: ApprovalPersistence + ?Sized> ApprovalPersistence for &mut T {
	fn load(&mut self) -> Option<BTreeSet<CourseId>> {
		(**self).load()
	}

	fn save(&mut self, approved: &BTreeSet<CourseId>) -> crate::Result<()> {
		(**self).save(approved)
	}
}

/// Owns the registry and the learner's approvals, see the [module docs](self).
#[derive(Debug)]
pub struct Gateway<R, P> {
	registry: Registry,
	approvals: ApprovalStore,
	states: CourseStates,
	renderer: R,
	persistence: P,
}

impl<R: Renderer, P: ApprovalPersistence> Gateway<R, P> {
	/// Restores saved progress from `persistence` and renders the initial states.
	///
	/// Missing or unreadable progress starts the learner from scratch.
	pub fn new(registry: Registry, renderer: R, mut persistence: P) -> Self {
		let approvals = match persistence.load() {
			Some(ids) => ApprovalStore::restore(&registry, ids),
			None => {
				log::info!("No saved progress, starting with no approved courses");
				ApprovalStore::new()
			},
		};
		let states = resolver::resolve(&registry, &approvals);

		let mut gateway = Self { registry, approvals, states, renderer, persistence };
		gateway.renderer.render(&gateway.registry, &gateway.states);
		gateway
	}

	/* Fields */

	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	pub fn approvals(&self) -> &ApprovalStore {
		&self.approvals
	}

	/// States as of the last mutation.
	pub fn states(&self) -> &CourseStates {
		&self.states
	}

	pub fn renderer(&self) -> &R {
		&self.renderer
	}

	pub fn persistence(&self) -> &P {
		&self.persistence
	}

	/* Requests */

	/// Marks an unlocked course as approved.
	///
	/// # Errors
	/// - [`UnknownCourse`](RequestError::UnknownCourse)
	/// - [`AlreadyApproved`](RequestError::AlreadyApproved)
	/// - [`Locked`](RequestError::Locked) when a prerequisite isn't approved.
	pub fn request_approve(&mut self, id: &str) -> Result<CourseStates, RequestError> {
		let id = self.known_id(id)?;

		if self.approvals.is_approved(id.as_str()) {
			return Err(RequestError::AlreadyApproved(id));
		}
		if self.current_state(&id)? != DisplayState::Unlocked {
			return Err(RequestError::Locked(id));
		}

		log::info!("Approving {}", id);
		self.approvals.add(id);
		self.refresh();
		Ok(self.states.clone())
	}

	/// Prepares to un-approve a course along with every approved course depending on it.
	///
	/// Nothing changes until [`PendingRetraction::commit()`] is called.
	///
	/// # Errors
	/// - [`UnknownCourse`](RequestError::UnknownCourse)
	/// - [`NotApproved`](RequestError::NotApproved)
	pub fn request_unapprove(&mut self, id: &str) -> Result<PendingRetraction<'_, R, P>, RequestError> {
		let id = self.known_id(id)?;

		if !self.approvals.is_approved(id.as_str()) {
			return Err(RequestError::NotApproved(id));
		}

		let retraction = cascade::compute_affected(id.as_str(), &self.registry, &self.approvals)
			.map_err(|_| RequestError::UnknownCourse(id.clone()))?;

		Ok(PendingRetraction { gateway: self, retraction })
	}

	/// Un-approves every course.
	///
	/// Asking the learner first is up to the caller, see [`reset_with()`](Gateway::reset_with()).
	pub fn reset_all(&mut self) -> CourseStates {
		log::info!("Resetting progress, {} approved courses cleared", self.approvals.len());
		self.approvals.clear();
		self.refresh();
		self.states.clone()
	}

	/// [`reset_all()`](Gateway::reset_all()) after the learner accepts [`RESET_WARNING`].
	pub fn reset_with(&mut self, confirmation: &mut impl Confirmation) -> Option<CourseStates> {
		if confirmation.confirm(RESET_WARNING) {
			Some(self.reset_all())
		} else {
			log::debug!("Reset declined");
			None
		}
	}

	fn known_id(&self, id: &str) -> Result<CourseId, RequestError> {
		self.registry.course(id)
			.map(|c| c.id.clone())
			.ok_or_else(|| RequestError::UnknownCourse(id.into()))
	}

	fn current_state(&self, id: &CourseId) -> Result<DisplayState, RequestError> {
		self.states.get(id).copied().ok_or_else(|| RequestError::UnknownCourse(id.clone()))
	}

	/// Recomputes the states then notifies the renderer and persistence, in that order.
	fn refresh(&mut self) {
		self.states = resolver::resolve(&self.registry, &self.approvals);
		self.renderer.render(&self.registry, &self.states);
		/* The in-memory progress stays authoritative even if it couldn't be written out */
		if let Err(e) = self.persistence.save(&self.approvals.approved_ids()) {
			log::error!("Failed to save progress: {}", e);
		}
	}
}

/// An un-approval waiting for the learner's decision.
///
/// Dropping it without calling [`commit()`](PendingRetraction::commit()) leaves everything untouched.
#[must_use = "nothing is un-approved until the retraction is committed"]
#[derive(Debug)]
pub struct PendingRetraction<'g, R, P> {
	gateway: &'g mut Gateway<R, P>,
	retraction: Retraction,
}

impl<'g, R: Renderer, P: ApprovalPersistence> PendingRetraction<'g, R, P> {
	pub fn retraction(&self) -> &Retraction {
		&self.retraction
	}

	/// Question to put to the learner, naming every course that would be un-approved.
	pub fn message(&self) -> String {
		let registry = &self.gateway.registry;
		let target = registry.display_name(self.retraction.target().as_str());

		if self.retraction.dependents().is_empty() {
			format!("Un-approve \"{}\"? Courses that depend on it may become locked.", target)
		} else {
			let dependents = self.retraction.dependents().iter()
				.map(|id| registry.display_name(id.as_str()))
				.collect::<Vec<_>>()
				.join(", ");
			format!("Un-approving \"{}\" also un-approves the courses that depend on it: {}. Continue?", target, dependents)
		}
	}

	/// Removes every affected course from the approvals.
	pub fn commit(self) -> CourseStates {
		log::info!("Un-approving {} ({} courses affected)", self.retraction.target(), self.retraction.len());
		cascade::retract(&self.retraction, &mut self.gateway.approvals);
		self.gateway.refresh();
		self.gateway.states.clone()
	}

	pub fn cancel(self) {
		log::debug!("Un-approving {} cancelled", self.retraction.target());
	}

	/// Commits only when `confirmation` accepts [`message()`](PendingRetraction::message()).
	pub fn confirm_with(self, confirmation: &mut impl Confirmation) -> Option<CourseStates> {
		if confirmation.confirm(&self.message()) {
			Some(self.commit())
		} else {
			self.cancel();
			None
		}
	}
}

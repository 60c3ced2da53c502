//! Terminal implementations of the gateway's rendering and confirmation collaborators.

use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use curriculum_rs::gateway::{Confirmation, Renderer};
use curriculum_rs::resolver::Summary;
use curriculum_rs::{Course, CourseStates, DisplayState, Registry};

/// Prints the whole curriculum on the first render when `show_all` is set, afterwards only
/// the courses whose state changed.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
	show_all: bool,
	previous: Option<CourseStates>,
}

impl TerminalRenderer {
	pub fn new(show_all: bool) -> Self {
		Self { show_all, previous: None }
	}
}

impl Renderer for TerminalRenderer {
	fn render(&mut self, registry: &Registry, states: &CourseStates) {
		match &self.previous {
			None => {
				if self.show_all {
					print_curriculum(registry, states);
					println!("{}", Summary::of(states));
				}
			},
			Some(previous) => {
				let mut changed = false;
				for course in registry.courses() {
					let (Some(old), Some(new)) = (previous.get(&course.id), states.get(&course.id)) else { continue };
					if old != new {
						println!("{} {:<8} {} ({} -> {})", marker(*new), course.id, course.display_name(), old, new);
						changed = true;
					}
				}
				if changed {
					println!("{}", Summary::of(states));
				}
			},
		}
		self.previous = Some(states.clone());
	}
}

fn marker(state: DisplayState) -> &'static str {
	match state {
		DisplayState::Approved => "[x]",
		DisplayState::Unlocked => "[ ]",
		DisplayState::Locked => "[-]",
	}
}

fn print_curriculum(registry: &Registry, states: &CourseStates) {
	/* Courses without a semester are listed last */
	let mut semesters = BTreeMap::<u32, Vec<&Course>>::new();
	for course in registry.courses() {
		semesters.entry(course.semester.unwrap_or(u32::MAX)).or_default().push(course);
	}

	for (semester, courses) in semesters {
		if semester == u32::MAX {
			println!("Unscheduled");
		} else {
			println!("Semester {}", semester);
		}
		for course in courses {
			let Some(state) = states.get(&course.id) else { continue };
			println!("  {} {:<8} {}", marker(*state), course.id, course.display_name());
		}
	}
}

/// Asks on stdin, anything but an explicit yes declines.
#[derive(Debug, Default)]
pub struct StdinConfirmation {
	assume_yes: bool,
}

impl StdinConfirmation {
	pub fn new(assume_yes: bool) -> Self {
		Self { assume_yes }
	}
}

impl Confirmation for StdinConfirmation {
	fn confirm(&mut self, message: &str) -> bool {
		if self.assume_yes {
			log::info!("Assuming yes for: {}", message);
			return true;
		}

		let stdin = std::io::stdin();
		loop {
			print!("{} [y/(n)] ", message);
			let _ = std::io::stdout().flush();

			let mut input = String::new();
			match stdin.lock().read_line(&mut input) {
				/* EOF, nobody is there to answer */
				Ok(0) | Err(_) => return false,
				Ok(_) => {},
			}
			let input = input.trim().to_lowercase();
			if input == "y" || input == "yes" {
				return true;
			} else if input == "n" || input == "no" || input.is_empty() {
				return false;
			} else {
				println!("\nInput invalid.")
			}
		}
	}
}

//! Implementation of the `coursehub category` commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use super::build_service;
use crate::cli::output::{category_table, output, CommandOutput};
use crate::domain::models::{
    Category, CategoryChanges, CategoryFilter, Config, NewCategory, Page, PageRequest,
    SearchCriteria,
};

#[derive(Args, Debug)]
pub struct CategoryArgs {
    #[command(subcommand)]
    pub command: CategoryCommand,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// List categories one page at a time
    List {
        /// Page number (1-based)
        #[arg(long)]
        page: Option<u32>,

        /// Categories per page
        #[arg(long)]
        per_page: Option<u32>,

        /// Only categories whose name contains this fragment
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Show one category
    Show {
        /// Category ID
        id: i64,
    },

    /// Create a category
    Create {
        /// Unique category name
        name: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Replace a category's name and description
    Update {
        /// Category ID
        id: i64,

        /// New name
        #[arg(short, long)]
        name: String,

        /// New description
        #[arg(short, long)]
        description: String,
    },

    /// Delete a category
    Delete {
        /// Category ID
        id: i64,
    },

    /// Search categories by name
    Search {
        /// Name fragment; omit to return every category
        name: Option<String>,
    },
}

#[derive(Debug, Serialize)]
pub struct CategoryPageOutput {
    pub data: Vec<Category>,
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl From<Page<Category>> for CategoryPageOutput {
    fn from(page: Page<Category>) -> Self {
        Self {
            current_page: page.current_page,
            last_page: page.last_page(),
            per_page: page.per_page,
            total: page.total,
            data: page.items,
        }
    }
}

impl CommandOutput for CategoryPageOutput {
    fn to_human(&self) -> String {
        if self.data.is_empty() {
            return "No categories found.".to_string();
        }
        format!(
            "{}\n\nPage {} of {} ({} total)",
            category_table(&self.data),
            self.current_page,
            self.last_page,
            self.total
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryListOutput {
    pub data: Vec<Category>,
}

impl CommandOutput for CategoryListOutput {
    fn to_human(&self) -> String {
        if self.data.is_empty() {
            return "No categories found.".to_string();
        }
        let count = self.data.len();
        format!(
            "{}\n\nFound {} categor{}",
            category_table(&self.data),
            count,
            if count == 1 { "y" } else { "ies" }
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CategoryOutput {
    pub category: Category,
}

impl CommandOutput for CategoryOutput {
    fn to_human(&self) -> String {
        let c = &self.category;
        [
            "\nCategory Details:".to_string(),
            "─────────────────────────────────────────".to_string(),
            format!("ID:          {}", c.id),
            format!("Name:        {}", c.name),
            format!("Description: {}", c.description.as_deref().unwrap_or("-")),
            format!("Created at:  {}", c.created_at.format("%Y-%m-%d %H:%M:%S UTC")),
            format!("Updated at:  {}", c.updated_at.format("%Y-%m-%d %H:%M:%S UTC")),
        ]
        .join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteOutput {
    pub status: bool,
    pub message: String,
}

impl CommandOutput for DeleteOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: CategoryArgs, config: &Config, json_mode: bool) -> Result<()> {
    let service = build_service(config).await?;

    match args.command {
        CategoryCommand::List {
            page,
            per_page,
            name,
        } => {
            let request = PageRequest::from_query(
                page,
                per_page,
                config.server.default_per_page,
                config.server.max_per_page,
            );
            let filter = CategoryFilter { name };
            let page = service.get_collection(&filter, request).await?;
            output(&CategoryPageOutput::from(page), json_mode);
        }
        CategoryCommand::Show { id } => {
            let category = service.get_by_id(id).await?;
            output(&CategoryOutput { category }, json_mode);
        }
        CategoryCommand::Create { name, description } => {
            let draft = NewCategory {
                name: Some(name),
                description,
            };
            let category = service.create(draft).await?;
            output(&CategoryOutput { category }, json_mode);
        }
        CategoryCommand::Update {
            id,
            name,
            description,
        } => {
            let category = service
                .update(id, CategoryChanges::new(name, description))
                .await?;
            output(&CategoryOutput { category }, json_mode);
        }
        CategoryCommand::Delete { id } => {
            service.delete(id).await?;
            let result = DeleteOutput {
                status: true,
                message: format!("Category {id} deleted."),
            };
            output(&result, json_mode);
        }
        CategoryCommand::Search { name } => {
            let data = service.search(&SearchCriteria { name }).await?;
            output(&CategoryListOutput { data }, json_mode);
        }
    }

    Ok(())
}

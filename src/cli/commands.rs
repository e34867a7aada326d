//! Command handlers and registration.

use chrono::NaiveDate;

use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::core::services::{ExpenseService, GroupService, SummaryService, WalletService};
use crate::currency::parse_amount;
use crate::domain::{
    category::Category,
    expense::{Expense, ExpenseMember, ExpensePatch},
    group::{Group, GroupPatch},
    user::User,
    wallet::WalletKind,
};
use crate::errors::StoreError;
use crate::store::ExpenseScope;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    registry.register(CommandEntry::new(
        "help",
        "Show available commands or details for one command",
        "help [command]",
        cmd_help,
    ));
    registry.register(CommandEntry::new(
        "summary",
        "Show spending totals, per-category amounts, and group balances",
        "summary",
        cmd_summary,
    ));
    registry.register(CommandEntry::new(
        "expenses",
        "List expenses, optionally filtered and searched",
        "expenses [all|personal|group] [query...]",
        cmd_expenses,
    ));
    registry.register(CommandEntry::new(
        "expense",
        "Add, inspect, edit, or delete a single expense",
        "expense <add|show|edit|delete> ...",
        cmd_expense,
    ));
    registry.register(CommandEntry::new(
        "split",
        "Add a group expense split evenly among the group's members",
        "split <group_index> <title> <amount> <category> [date]",
        cmd_split,
    ));
    registry.register(CommandEntry::new(
        "groups",
        "List groups",
        "groups",
        cmd_groups,
    ));
    registry.register(CommandEntry::new(
        "group",
        "Add, inspect, rename, or delete a group",
        "group <add|show|rename|delete> ...",
        cmd_group,
    ));
    registry.register(CommandEntry::new(
        "member",
        "Manage a group's membership",
        "member <add|remove> <group_index> ...",
        cmd_member,
    ));
    registry.register(CommandEntry::new(
        "wallets",
        "Show wallet balances, limits, and goals",
        "wallets",
        cmd_wallets,
    ));
    registry.register(CommandEntry::new(
        "wallet",
        "Update wallet limits, goals, or balances",
        "wallet <limit|goal|fixed|deposit> ...",
        cmd_wallet,
    ));
    registry.register(CommandEntry::new(
        "transfer",
        "Move funds from the spending wallet into savings",
        "transfer <amount>",
        cmd_transfer,
    ));
    registry.register(CommandEntry::new(
        "use-savings",
        "Move funds from savings back into the spending wallet",
        "use-savings <amount>",
        cmd_use_savings,
    ));
    registry.register(CommandEntry::new(
        "report",
        "Show category, monthly, daily, or recent-expense reports",
        "report <categories|monthly|daily|recent> [...]",
        cmd_report,
    ));
    registry.register(CommandEntry::new(
        "export",
        "Print the whole store as JSON",
        "export",
        cmd_export,
    ));
    registry.register(CommandEntry::new(
        "config",
        "Show or change the app configuration",
        "config <show|set> [key] [value]",
        cmd_config,
    ));
    registry.register(CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit));
    registry.register(CommandEntry::new("quit", "Leave the shell", "quit", cmd_exit));
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let entry = context.command(&name.to_lowercase()).ok_or_else(|| {
            CommandError::InvalidArguments(format!("unknown command `{}`", name))
        })?;
        cli_io::print_info(format!("{} - {}", entry.name, entry.description));
        cli_io::print_info(format!("usage: {}", entry.usage));
        return Ok(());
    }
    output::section("Commands");
    let rows: Vec<Vec<String>> = context
        .registry
        .list()
        .iter()
        .map(|entry| vec![entry.name.to_string(), entry.description.to_string()])
        .collect();
    output::render_table(&["Command", "Description"], &rows);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = SummaryService::overview(&context.store, context.today());
    output::section("Summary");
    cli_io::print_info(format!(
        "Total spent: {}",
        context.format_amount(summary.total_spent)
    ));
    cli_io::print_info(format!(
        "This month:  {}",
        context.format_amount(summary.this_month)
    ));
    cli_io::print_info(format!(
        "This week:   {}",
        context.format_amount(summary.this_week)
    ));

    if !summary.by_category.is_empty() {
        output::section("By category");
        let rows: Vec<Vec<String>> = summary
            .by_category
            .iter()
            .map(|(category, amount)| {
                vec![category.to_string(), context.format_amount(*amount)]
            })
            .collect();
        output::render_table(&["Category", "Amount"], &rows);
    }

    let balances = SummaryService::group_balances(&context.store);
    if !balances.is_empty() {
        output::section("Group balances");
        let rows: Vec<Vec<String>> = balances
            .iter()
            .map(|balance| {
                vec![
                    balance.group_name.clone(),
                    context.format_amount(balance.total),
                    context.format_amount(balance.you_owe),
                    context.format_amount(balance.you_are_owed),
                ]
            })
            .collect();
        output::render_table(&["Group", "Total", "You owe", "You are owed"], &rows);
    }
    Ok(())
}

fn cmd_expenses(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (scope, rest) = match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        Some("personal") => (ExpenseScope::Personal, &args[1..]),
        Some("group") => (ExpenseScope::Group, &args[1..]),
        Some("all") => (ExpenseScope::All, &args[1..]),
        _ => (ExpenseScope::All, args),
    };
    let query = if rest.is_empty() {
        None
    } else {
        Some(rest.join(" "))
    };

    let matches = SummaryService::filtered(&context.store, scope, query.as_deref());
    if matches.is_empty() {
        cli_io::print_warning("No expenses match.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = matches
        .iter()
        .map(|expense| {
            let index = context
                .store
                .expenses()
                .iter()
                .position(|candidate| candidate.id == expense.id)
                .unwrap_or_default();
            vec![
                index.to_string(),
                expense.date.format("%Y-%m-%d").to_string(),
                expense.title.clone(),
                expense.category.to_string(),
                context.format_amount(expense.amount),
                (if expense.is_group { "group" } else { "personal" }).to_string(),
            ]
        })
        .collect();
    output::render_table(&["#", "Date", "Title", "Category", "Amount", "Type"], &rows);
    Ok(())
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        Some("add") => expense_add(context, &args[1..]),
        Some("show") => expense_show(context, &args[1..]),
        Some("edit") => expense_edit(context, &args[1..]),
        Some("delete") => expense_delete(context, &args[1..]),
        _ => Err(CommandError::InvalidArguments(
            "usage: expense <add|show|edit|delete> ...".into(),
        )),
    }
}

fn expense_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: expense add <title> <amount> <category> [date] [description...]".into(),
        ));
    }
    let title = args[0];
    let amount = parse_amount(args[1])
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
    let category = parse_category(args[2]);

    let (date, description_args) = match args.get(3).and_then(|raw| parse_date(raw).ok()) {
        Some(date) => (date, &args[4..]),
        None => (context.today(), &args[3..]),
    };

    let mut expense = Expense::new(title, amount, category, date);
    if !description_args.is_empty() {
        expense = expense.with_description(description_args.join(" "));
    }

    ExpenseService::add(&mut context.store, expense)?;
    cli_io::print_success(format!(
        "Expense `{}` added ({}).",
        title,
        context.format_amount(amount)
    ));
    Ok(())
}

fn expense_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let index = parse_index(args.first(), "usage: expense show <index>")?;
    let id = context.expense_id_at(index)?;
    let expense = context
        .store
        .expense(id)
        .ok_or(StoreError::ExpenseNotFound(id))?;

    output::section(&expense.title);
    cli_io::print_info(format!("Amount:   {}", context.format_amount(expense.amount)));
    cli_io::print_info(format!(
        "Category: {} ({})",
        expense.category,
        expense.category.color()
    ));
    cli_io::print_info(format!("Date:     {}", expense.date.format("%b %d, %Y")));
    if let Some(description) = &expense.description {
        cli_io::print_info(format!("Notes:    {}", description));
    }
    if expense.is_group {
        let group_name = expense
            .group_id
            .and_then(|group_id| context.store.group(group_id))
            .map(|group| group.name.clone())
            .unwrap_or_else(|| "(unknown group)".into());
        cli_io::print_info(format!("Group:    {}", group_name));
        let payer = expense
            .paid_by
            .map(|payer| {
                if payer == context.store.current_user().id {
                    "You".to_string()
                } else {
                    expense
                        .members
                        .iter()
                        .find(|member| member.user_id == payer)
                        .map(|member| member.user_name.clone())
                        .unwrap_or_else(|| "Unknown".into())
                }
            })
            .unwrap_or_else(|| "Unknown".into());
        cli_io::print_info(format!("Paid by:  {}", payer));
        if !expense.members.is_empty() {
            let rows: Vec<Vec<String>> = expense
                .members
                .iter()
                .map(|member| {
                    vec![
                        member.user_name.clone(),
                        context.format_amount(member.amount),
                        (if member.paid { "paid" } else { "unpaid" }).to_string(),
                    ]
                })
                .collect();
            output::render_table(&["Member", "Share", "Status"], &rows);
        }
    }
    Ok(())
}

fn expense_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "usage: expense edit <index> <title|amount|category|date|description> <value...>";
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(USAGE.into()));
    }
    let index = parse_index(args.first(), USAGE)?;
    let id = context.expense_id_at(index)?;
    let value = args[2..].join(" ");

    let mut patch = ExpensePatch::default();
    match args[1].to_lowercase().as_str() {
        "title" => patch.title = Some(value),
        "amount" => {
            let amount = parse_amount(&value)
                .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
            patch.amount = Some(amount);
        }
        "category" => patch.category = Some(parse_category(&value)),
        "date" => patch.date = Some(parse_date(&value)?),
        "description" => {
            patch.description = if value.is_empty() {
                Some(None)
            } else {
                Some(Some(value))
            };
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown field `{}`. {}",
                other, USAGE
            )))
        }
    }

    ExpenseService::update(&mut context.store, id, patch)?;
    cli_io::print_success("Expense updated.");
    Ok(())
}

fn expense_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let index = parse_index(args.first(), "usage: expense delete <index>")?;
    let id = context.expense_id_at(index)?;
    let title = context
        .store
        .expense(id)
        .map(|expense| expense.title.clone())
        .ok_or(StoreError::ExpenseNotFound(id))?;

    if !context.confirm(&format!("Delete expense `{}`?", title))? {
        cli_io::print_info("Operation cancelled.");
        return Ok(());
    }
    let removed = ExpenseService::remove(&mut context.store, id)?;
    cli_io::print_success(format!(
        "Expense `{}` removed ({}).",
        removed.title,
        context.format_amount(removed.amount)
    ));
    Ok(())
}

fn cmd_split(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "usage: split <group_index> <title> <amount> <category> [date]";
    if args.len() < 4 {
        return Err(CommandError::InvalidArguments(USAGE.into()));
    }
    let group_index = parse_index(args.first(), USAGE)?;
    let group_id = context.group_id_at(group_index)?;
    let title = args[1];
    let amount = parse_amount(args[2])
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
    let category = parse_category(args[3]);
    let date = match args.get(4) {
        Some(raw) => parse_date(raw)?,
        None => context.today(),
    };

    let group = context
        .store
        .group(group_id)
        .ok_or(StoreError::GroupNotFound(group_id))?;
    let share = round_cents(amount / group.members.len() as f64);
    let payer = context.store.current_user().id;
    let members: Vec<ExpenseMember> = group
        .members
        .iter()
        .map(|member| ExpenseMember::new(member, share, member.id == payer))
        .collect();

    let expense = Expense::new(title, amount, category, date).shared(group_id, payer, members);
    ExpenseService::add(&mut context.store, expense)?;
    cli_io::print_success(format!(
        "Split `{}` across {} members ({} each).",
        title,
        context.store.group(group_id).map(|g| g.members.len()).unwrap_or_default(),
        context.format_amount(share)
    ));
    Ok(())
}

fn cmd_groups(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.store.groups().is_empty() {
        cli_io::print_warning("No groups yet. Use `group add <name>` to create one.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = context
        .store
        .groups()
        .iter()
        .enumerate()
        .map(|(index, group)| {
            vec![
                index.to_string(),
                group.name.clone(),
                group.members.len().to_string(),
                context.format_amount(group.total_expenses),
                group.created_at.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect();
    output::render_table(&["#", "Name", "Members", "Total", "Created"], &rows);
    Ok(())
}

fn cmd_group(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        Some("add") => group_add(context, &args[1..]),
        Some("show") => group_show(context, &args[1..]),
        Some("rename") => group_rename(context, &args[1..]),
        Some("delete") => group_delete(context, &args[1..]),
        _ => Err(CommandError::InvalidArguments(
            "usage: group <add|show|rename|delete> ...".into(),
        )),
    }
}

fn group_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = match args.first() {
        Some(name) => name.to_string(),
        None if context.mode() == CliMode::Interactive => {
            cli_io::prompt_text(&context.theme, "Group name")?
        }
        None => {
            return Err(CommandError::InvalidArguments(
                "usage: group add <name> [description...]".into(),
            ))
        }
    };
    let mut group = Group::new(name.clone(), vec![context.store.current_user().clone()]);
    if args.len() > 1 {
        group = group.with_description(args[1..].join(" "));
    }
    GroupService::add(&mut context.store, group)?;
    cli_io::print_success(format!("Group `{}` created.", name));
    Ok(())
}

fn group_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let index = parse_index(args.first(), "usage: group show <index>")?;
    let group_id = context.group_id_at(index)?;
    let group = context
        .store
        .group(group_id)
        .ok_or(StoreError::GroupNotFound(group_id))?;

    output::section(&group.name);
    if let Some(description) = &group.description {
        cli_io::print_info(description);
    }
    cli_io::print_info(format!(
        "Total expenses: {}",
        context.format_amount(group.total_expenses)
    ));

    let me = context.store.current_user().id;
    let member_rows: Vec<Vec<String>> = group
        .members
        .iter()
        .enumerate()
        .map(|(member_index, member)| {
            let name = if member.id == me {
                format!("{} (You)", member.name)
            } else {
                member.name.clone()
            };
            vec![member_index.to_string(), name, member.email.clone()]
        })
        .collect();
    output::section("Members");
    output::render_table(&["#", "Name", "Email"], &member_rows);

    let balances = SummaryService::member_balances(&context.store, group_id)?;
    let balance_rows: Vec<Vec<String>> = balances
        .iter()
        .map(|balance| {
            let position = if balance.net > 0.0 {
                format!("Gets back {}", context.format_amount(balance.net))
            } else if balance.net < 0.0 {
                format!("Owes {}", context.format_amount(balance.net.abs()))
            } else {
                "Settled up".to_string()
            };
            vec![
                balance.user_name.clone(),
                context.format_amount(balance.paid),
                context.format_amount(balance.owed),
                position,
            ]
        })
        .collect();
    output::section("Balance");
    output::render_table(&["Member", "Paid", "Owed", "Position"], &balance_rows);

    let expenses = context.store.group_expenses(group_id);
    if !expenses.is_empty() {
        let expense_rows: Vec<Vec<String>> = expenses
            .iter()
            .map(|expense| {
                vec![
                    expense.date.format("%Y-%m-%d").to_string(),
                    expense.title.clone(),
                    context.format_amount(expense.amount),
                ]
            })
            .collect();
        output::section("Expenses");
        output::render_table(&["Date", "Title", "Amount"], &expense_rows);
    }
    Ok(())
}

fn group_rename(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "usage: group rename <index> <name>";
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(USAGE.into()));
    }
    let index = parse_index(args.first(), USAGE)?;
    let group_id = context.group_id_at(index)?;
    let patch = GroupPatch {
        name: Some(args[1..].join(" ")),
        ..GroupPatch::default()
    };
    GroupService::update(&mut context.store, group_id, patch)?;
    cli_io::print_success("Group renamed.");
    Ok(())
}

fn group_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let index = parse_index(args.first(), "usage: group delete <index>")?;
    let group_id = context.group_id_at(index)?;
    let (name, linked) = {
        let group = context
            .store
            .group(group_id)
            .ok_or(StoreError::GroupNotFound(group_id))?;
        (group.name.clone(), context.store.group_expenses(group_id).len())
    };

    if !context.confirm(&format!(
        "Delete group `{}` and its {} linked expense(s)?",
        name, linked
    ))? {
        cli_io::print_info("Operation cancelled.");
        return Ok(());
    }
    GroupService::remove(&mut context.store, group_id)?;
    cli_io::print_success(format!("Group `{}` deleted.", name));
    Ok(())
}

fn cmd_member(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        Some("add") => member_add(context, &args[1..]),
        Some("remove") => member_remove(context, &args[1..]),
        _ => Err(CommandError::InvalidArguments(
            "usage: member <add|remove> <group_index> ...".into(),
        )),
    }
}

fn member_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "usage: member add <group_index> <name> <email>";
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(USAGE.into()));
    }
    let index = parse_index(args.first(), USAGE)?;
    let group_id = context.group_id_at(index)?;
    let group = context
        .store
        .group(group_id)
        .ok_or(StoreError::GroupNotFound(group_id))?;

    let mut members = group.members.clone();
    members.push(User::new(args[1], args[2]));
    let patch = GroupPatch {
        members: Some(members),
        ..GroupPatch::default()
    };
    GroupService::update(&mut context.store, group_id, patch)?;
    cli_io::print_success(format!("Member `{}` added.", args[1]));
    Ok(())
}

fn member_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "usage: member remove <group_index> <member_index>";
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(USAGE.into()));
    }
    let index = parse_index(args.first(), USAGE)?;
    let member_index = parse_index(args.get(1), USAGE)?;
    let group_id = context.group_id_at(index)?;
    let group = context
        .store
        .group(group_id)
        .ok_or(StoreError::GroupNotFound(group_id))?;

    if member_index >= group.members.len() {
        return Err(CommandError::InvalidArguments(
            "member index out of range".into(),
        ));
    }
    let removed = group.members[member_index].name.clone();
    let mut members = group.members.clone();
    members.remove(member_index);
    let patch = GroupPatch {
        members: Some(members),
        ..GroupPatch::default()
    };
    GroupService::update(&mut context.store, group_id, patch)?;
    cli_io::print_success(format!("Member `{}` removed.", removed));
    Ok(())
}

fn cmd_wallets(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let rows: Vec<Vec<String>> = context
        .store
        .wallets()
        .iter()
        .map(|wallet| {
            let detail = match wallet.kind {
                WalletKind::Spending => wallet
                    .monthly_limit
                    .map(|limit| format!("limit {}", context.format_amount(limit)))
                    .unwrap_or_default(),
                WalletKind::Savings => {
                    let goal = wallet
                        .savings_goal
                        .map(|goal| format!("goal {}", context.format_amount(goal)))
                        .unwrap_or_default();
                    let fixed = wallet
                        .fixed_expenses
                        .map(|fixed| format!("fixed {}", context.format_amount(fixed)))
                        .unwrap_or_default();
                    [goal, fixed]
                        .iter()
                        .filter(|part| !part.is_empty())
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                }
            };
            vec![
                wallet.kind.to_string(),
                context.format_amount(wallet.amount),
                detail,
            ]
        })
        .collect();
    output::render_table(&["Wallet", "Balance", "Details"], &rows);
    Ok(())
}

fn cmd_wallet(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "usage: wallet <limit|goal|fixed|deposit> <amount> | wallet deposit <spending|savings> <amount>";
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        Some("limit") => {
            let amount = parse_amount_arg(args.get(1), USAGE)?;
            WalletService::set_monthly_limit(&mut context.store, amount)?;
            cli_io::print_success(format!(
                "Monthly spending limit set to {}.",
                context.format_amount(amount)
            ));
            Ok(())
        }
        Some("goal") => {
            let amount = parse_amount_arg(args.get(1), USAGE)?;
            WalletService::set_savings_goal(&mut context.store, amount)?;
            cli_io::print_success(format!(
                "Savings goal set to {}.",
                context.format_amount(amount)
            ));
            Ok(())
        }
        Some("fixed") => {
            let amount = parse_amount_arg(args.get(1), USAGE)?;
            WalletService::set_fixed_expenses(&mut context.store, amount)?;
            cli_io::print_success(format!(
                "Fixed expenses set to {}.",
                context.format_amount(amount)
            ));
            Ok(())
        }
        Some("deposit") => {
            let kind = match args.get(1).map(|arg| arg.to_lowercase()).as_deref() {
                Some("spending") => WalletKind::Spending,
                Some("savings") => WalletKind::Savings,
                _ => return Err(CommandError::InvalidArguments(USAGE.into())),
            };
            let amount = parse_amount_arg(args.get(2), USAGE)?;
            WalletService::deposit(&mut context.store, kind, amount)?;
            cli_io::print_success(format!(
                "Deposited {} into the {} wallet.",
                context.format_amount(amount),
                kind
            ));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(USAGE.into())),
    }
}

fn cmd_transfer(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let amount = parse_amount_arg(args.first(), "usage: transfer <amount>")?;
    WalletService::transfer_to_savings(&mut context.store, amount)?;
    cli_io::print_success(format!(
        "Transferred {} to the savings wallet.",
        context.format_amount(amount)
    ));
    Ok(())
}

fn cmd_use_savings(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let amount = parse_amount_arg(args.first(), "usage: use-savings <amount>")?;
    WalletService::use_savings(&mut context.store, amount)?;
    cli_io::print_success(format!(
        "Used {} from the savings wallet.",
        context.format_amount(amount)
    ));
    Ok(())
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "usage: report <categories|monthly|daily|recent> [...]";
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        Some("categories") => {
            let breakdown = SummaryService::category_breakdown(&context.store);
            if breakdown.is_empty() {
                cli_io::print_warning("Nothing spent yet.");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = breakdown
                .iter()
                .map(|slice| {
                    vec![
                        slice.category.to_string(),
                        context.format_amount(slice.amount),
                        format!("{:.0}%", slice.share * 100.0),
                        slice.category.color().to_string(),
                    ]
                })
                .collect();
            output::render_table(&["Category", "Amount", "Share", "Color"], &rows);
            Ok(())
        }
        Some("monthly") => {
            let months = parse_count(args.get(1), 6)?;
            let trend =
                SummaryService::monthly_totals(&context.store, context.today(), months)?;
            let rows: Vec<Vec<String>> = trend
                .iter()
                .map(|entry| {
                    vec![
                        entry.month.format("%b %Y").to_string(),
                        context.format_amount(entry.total),
                    ]
                })
                .collect();
            output::render_table(&["Month", "Total"], &rows);
            Ok(())
        }
        Some("daily") => {
            let days = parse_count(args.get(1), 30)?;
            let category = args.get(2).map(|raw| parse_category(raw));
            let trend =
                SummaryService::daily_totals(&context.store, context.today(), days, category)?;
            let rows: Vec<Vec<String>> = trend
                .iter()
                .filter(|entry| entry.total > 0.0)
                .map(|entry| {
                    vec![
                        entry.date.format("%Y-%m-%d").to_string(),
                        context.format_amount(entry.total),
                    ]
                })
                .collect();
            if rows.is_empty() {
                cli_io::print_warning("No spending inside the window.");
                return Ok(());
            }
            output::render_table(&["Date", "Total"], &rows);
            Ok(())
        }
        Some("recent") => {
            let limit = parse_count(args.get(1), context.config.recent_limit as u32)? as usize;
            let recent = SummaryService::recent(&context.store, limit);
            if recent.is_empty() {
                cli_io::print_warning("No expenses yet.");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = recent
                .iter()
                .map(|expense| {
                    vec![
                        expense.date.format("%Y-%m-%d").to_string(),
                        expense.title.clone(),
                        expense.category.to_string(),
                        context.format_amount(expense.amount),
                    ]
                })
                .collect();
            output::render_table(&["Date", "Title", "Category", "Amount"], &rows);
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(USAGE.into())),
    }
}

fn cmd_export(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let json = serde_json::to_string_pretty(&context.store)?;
    println!("{}", json);
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "usage: config <show|set> [key] [value]";
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        Some("show") | None => {
            output::section("Configuration");
            cli_io::print_info(format!("  Locale:       {}", context.config.locale));
            cli_io::print_info(format!("  Currency:     {}", context.config.currency));
            cli_io::print_info(format!("  Recent limit: {}", context.config.recent_limit));
            cli_io::print_info(format!(
                "  File:         {}",
                context_config_path(context)
            ));
            Ok(())
        }
        Some("set") => {
            let (Some(key), Some(value)) = (args.get(1), args.get(2)) else {
                return Err(CommandError::InvalidArguments(USAGE.into()));
            };
            match key.to_lowercase().as_str() {
                "locale" => context.config.locale = value.to_string(),
                "currency" => context.config.currency = value.to_uppercase(),
                "recent_limit" => {
                    let parsed: usize = value.parse().map_err(|_| {
                        CommandError::InvalidArguments("recent_limit must be numeric".into())
                    })?;
                    if parsed == 0 {
                        return Err(CommandError::InvalidArguments(
                            "recent_limit must be at least 1".into(),
                        ));
                    }
                    context.config.recent_limit = parsed;
                }
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "unknown config key `{}`",
                        other
                    )))
                }
            }
            context.persist_config()?;
            cli_io::print_success("Configuration updated.");
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(USAGE.into())),
    }
}

fn context_config_path(context: &ShellContext) -> String {
    context.config_path().display().to_string()
}

// --- argument helpers ---------------------------------------------------

fn parse_index(arg: Option<&&str>, usage: &str) -> Result<usize, CommandError> {
    let raw = arg.ok_or_else(|| CommandError::InvalidArguments(usage.into()))?;
    raw.parse::<usize>()
        .map_err(|_| CommandError::InvalidArguments("index must be numeric".into()))
}

fn parse_amount_arg(arg: Option<&&str>, usage: &str) -> Result<f64, CommandError> {
    let raw = arg.ok_or_else(|| CommandError::InvalidArguments(usage.into()))?;
    parse_amount(raw).map_err(|err| CommandError::InvalidArguments(err.to_string()))
}

fn parse_count(arg: Option<&&str>, default: u32) -> Result<u32, CommandError> {
    match arg {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| CommandError::InvalidArguments("count must be numeric".into())),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a date (expected YYYY-MM-DD)", raw))
    })
}

fn parse_category(raw: &str) -> Category {
    match raw.parse::<Category>() {
        Ok(category) => category,
        Err(_) => {
            cli_io::print_warning(format!("Unknown category `{}`, using Other.", raw));
            Category::Other
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

use crate::clients::PlanClient;

pub async fn list(client: &PlanClient, user_id: Option<&str>) -> anyhow::Result<()> {
    let plans = client.list_plans(user_id).await?;
    if plans.is_empty() {
        println!("No training plans found.");
        return Ok(());
    }
    for plan in &plans {
        let days = plan.configured_days().join(", ");
        println!(
            "{:>4}  {}  [{}]",
            plan.id,
            plan.name,
            if days.is_empty() {
                "no days configured".to_string()
            } else {
                days
            }
        );
        if !plan.template_name.is_empty() {
            println!("      template: {}", plan.template_name);
        }
    }
    Ok(())
}

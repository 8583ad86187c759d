//! Example demonstrating stack construction and template synthesis.

use stratus::{LookupContext, StackfileParser, Vpc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    stratus::observability::init().ok();

    println!("=== Stratus Stack Synthesis Demo ===\n");

    // A stackfile with an editable VPC placeholder, as a user would write it
    let yaml = r#"
name: ecs-demo
vpc:
  id: vpc-0a1b2c3d
  region: ap-northeast-1
image:
  directory: ./demos/app
service:
  desired_count: 1
schedule:
  expression: "cron(0 15 * * ? *)"
  enabled: false
"#;

    let stackfile = StackfileParser::parse(yaml)?;
    println!("Stack: {}", stackfile.name);
    println!("VPC: {} ({})", stackfile.vpc.id, stackfile.vpc.region);
    println!("Schedule: {} (enabled: {})\n", stackfile.schedule.expression, stackfile.schedule.enabled);

    // Seed the lookup context; in a real deployment these attributes come
    // from the target account
    let mut context = LookupContext::new();
    context.register_vpc(Vpc {
        vpc_id: "vpc-0a1b2c3d".to_string(),
        region: "ap-northeast-1".to_string(),
        cidr: "10.0.0.0/16".to_string(),
        availability_zones: vec!["ap-northeast-1a".to_string(), "ap-northeast-1c".to_string()],
        public_subnet_ids: vec!["subnet-pub1".to_string(), "subnet-pub2".to_string()],
        private_subnet_ids: vec!["subnet-priv1".to_string(), "subnet-priv2".to_string()],
    });

    let config = stackfile.into_stack_config();
    match stratus::FargateStack::build(config, &context) {
        Ok(stack) => {
            println!("Image asset: {}", stack.image_asset().image_uri);
            let template = stack.synth()?;
            println!("Synthesized {} resources:", template.len());
            for resource_type in template.resource_types() {
                println!("  - {}", resource_type);
            }
            println!("\n{}", template.to_json_string()?);
        }
        Err(e) => {
            println!("Could not build stack (build context may not exist): {}", e);
        }
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}

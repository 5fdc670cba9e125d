//! Domain layer health check functionality
//! This module provides the health-status types reported by the server

use std::collections::HashMap;

use async_trait::async_trait;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced performance
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

impl SystemHealth {
    /// Derive the overall status from the component map
    pub fn from_components(components: HashMap<String, HealthComponent>) -> Self {
        let status = if components
            .values()
            .any(|c| c.status == ComponentStatus::Unhealthy)
        {
            SystemStatus::Unhealthy
        } else if components
            .values()
            .any(|c| c.status == ComponentStatus::Degraded)
        {
            SystemStatus::Degraded
        } else {
            SystemStatus::Healthy
        };

        Self { status, components }
    }
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(status: ComponentStatus) -> HealthComponent {
        HealthComponent {
            status,
            details: None,
        }
    }

    #[test]
    fn test_overall_status_healthy() {
        let health = SystemHealth::from_components(
            vec![
                ("model".to_string(), component(ComponentStatus::Healthy)),
                ("audit_log".to_string(), component(ComponentStatus::Healthy)),
            ]
            .into_iter()
            .collect(),
        );
        assert_eq!(health.status, SystemStatus::Healthy);
    }

    #[test]
    fn test_overall_status_degrades() {
        let health = SystemHealth::from_components(
            vec![
                ("model".to_string(), component(ComponentStatus::Healthy)),
                ("audit_log".to_string(), component(ComponentStatus::Degraded)),
            ]
            .into_iter()
            .collect(),
        );
        assert_eq!(health.status, SystemStatus::Degraded);
    }

    #[test]
    fn test_unhealthy_component_dominates() {
        let health = SystemHealth::from_components(
            vec![
                ("model".to_string(), component(ComponentStatus::Unhealthy)),
                ("audit_log".to_string(), component(ComponentStatus::Degraded)),
            ]
            .into_iter()
            .collect(),
        );
        assert_eq!(health.status, SystemStatus::Unhealthy);
    }
}
